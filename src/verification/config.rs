use crate::config::ConfigError;
use crate::constants::{DEFAULT_MIN_LENGTH_RATIO, DEFAULT_VERIFICATION_THRESHOLD};

/// Calibration for [`TokenVerifier`](super::TokenVerifier).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifierConfig {
    /// Minimum score for acceptance (inclusive). Default: `0.97`.
    pub threshold: f64,
    /// Minimum `len(candidate) / len(reference)`. Default: `0.8`.
    pub min_length_ratio: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_VERIFICATION_THRESHOLD,
            min_length_ratio: DEFAULT_MIN_LENGTH_RATIO,
        }
    }
}

impl VerifierConfig {
    /// Sets the acceptance threshold.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the length floor ratio.
    pub fn min_length_ratio(mut self, ratio: f64) -> Self {
        self.min_length_ratio = ratio;
        self
    }

    /// Rejects non-finite values, thresholds outside `[0, 1]`, and negative ratios.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.threshold,
            });
        }

        if !self.min_length_ratio.is_finite() || self.min_length_ratio < 0.0 {
            return Err(ConfigError::InvalidLengthRatio {
                value: self.min_length_ratio,
            });
        }

        Ok(())
    }
}
