use tracing::{debug, trace};

use crate::config::ConfigError;
use crate::similarity::{JaroWinkler, Similarity};

use super::config::VerifierConfig;
use super::types::Verdict;

/// Verifies candidates against references with a configurable calibration.
#[derive(Debug, Clone)]
pub struct TokenVerifier<S = JaroWinkler> {
    config: VerifierConfig,
    metric: S,
}

impl Default for TokenVerifier {
    fn default() -> Self {
        Self {
            config: VerifierConfig::default(),
            metric: JaroWinkler,
        }
    }
}

impl TokenVerifier<JaroWinkler> {
    /// Creates a Jaro-Winkler verifier after validating `config`.
    pub fn new(config: VerifierConfig) -> Result<Self, ConfigError> {
        Self::with_metric(config, JaroWinkler)
    }
}

impl<S: Similarity> TokenVerifier<S> {
    /// Creates a verifier scoring with `metric`.
    pub fn with_metric(config: VerifierConfig, metric: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, metric })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Scores `candidate` against `reference` without the length floor.
    pub fn score(&self, candidate: &str, reference: &str) -> f64 {
        self.metric.similarity(reference, candidate)
    }

    pub fn verify(&self, candidate: &str, reference: &str) -> Verdict {
        let candidate_len = candidate.chars().count();
        let required_len = reference.chars().count() as f64 * self.config.min_length_ratio;

        if (candidate_len as f64) < required_len {
            debug!(candidate_len, required_len, "Candidate below length floor");
            return Verdict::TooShort {
                candidate_len,
                required_len,
            };
        }

        let score = self.score(candidate, reference);

        trace!(
            metric = self.metric.name(),
            score,
            threshold = self.config.threshold,
            "Candidate scored"
        );

        if score >= self.config.threshold {
            Verdict::Verified { score }
        } else {
            debug!(
                score,
                threshold = self.config.threshold,
                "Candidate below threshold"
            );
            Verdict::Rejected { score }
        }
    }

    /// Verifies `(candidate, reference)` pairs in order.
    pub fn verify_batch<'a, I>(&self, pairs: I) -> Vec<Verdict>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .map(|(candidate, reference)| self.verify(candidate, reference))
            .collect()
    }
}
