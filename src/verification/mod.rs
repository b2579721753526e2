//! Accept/reject decisions for candidate outputs.
//!
//! A candidate is compared against the reference (ground-truth) output in two steps:
//!
//! 1. **Length floor**: a candidate with fewer than `min_length_ratio * len(reference)`
//!    characters is rejected without scoring. This cheaply catches truncated outputs.
//! 2. **Similarity threshold**: the Jaro-Winkler score of `(reference, candidate)` must
//!    reach `threshold`.
//!
//! [`check_tokens`] applies the default calibration (`0.8` / `0.97`). Use
//! [`TokenVerifier`] to tune either value or to inspect the score behind a decision.

pub mod config;
pub mod types;
pub mod verifier;


pub use config::VerifierConfig;
pub use types::Verdict;
pub use verifier::TokenVerifier;

/// Returns `true` if `candidate` matches `reference` closely enough to be accepted.
///
/// Equivalent to verifying with [`TokenVerifier::default`] and taking
/// [`Verdict::is_verified`].
pub fn check_tokens(candidate: &str, reference: &str) -> bool {
    TokenVerifier::default()
        .verify(candidate, reference)
        .is_verified()
}
