use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
/// Outcome of verifying one candidate against its reference.
pub enum Verdict {
    /// Score reached the threshold.
    Verified {
        /// Similarity score.
        score: f64,
    },
    /// Score fell below the threshold.
    Rejected {
        /// Similarity score.
        score: f64,
    },
    /// Candidate failed the length floor and was never scored.
    TooShort {
        /// Candidate length in characters.
        candidate_len: usize,
        /// Length the candidate needed to reach.
        required_len: f64,
    },
}

impl Verdict {
    /// Returns `true` if verified.
    pub fn is_verified(&self) -> bool {
        matches!(self, Verdict::Verified { .. })
    }

    /// Returns the score (if the candidate was scored).
    pub fn score(&self) -> Option<f64> {
        match self {
            Verdict::Verified { score } | Verdict::Rejected { score } => Some(*score),
            Verdict::TooShort { .. } => None,
        }
    }

    /// Returns a short debug string.
    pub fn debug_status(&self) -> &'static str {
        match self {
            Verdict::Verified { .. } => "VERIFIED",
            Verdict::Rejected { .. } => "REJECTED",
            Verdict::TooShort { .. } => "TOO_SHORT",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Verified { score } => write!(f, "VERIFIED (score: {:.4})", score),
            Verdict::Rejected { score } => write!(f, "REJECTED (score: {:.4})", score),
            Verdict::TooShort {
                candidate_len,
                required_len,
            } => write!(
                f,
                "TOO_SHORT (len: {}, min: {:.1})",
                candidate_len, required_len
            ),
        }
    }
}

impl From<Verdict> for bool {
    fn from(verdict: Verdict) -> Self {
        verdict.is_verified()
    }
}
