//! Jaro and Jaro-Winkler string similarity.
//!
//! Scores are `f64` in `[0.0, 1.0]`, where `1.0` means identical. Inputs are indexed
//! by Unicode scalar value, so `"héllo"` has length 5.
//!
//! # Transposition Accumulation
//!
//! The transposition term does **not** follow the textbook definition (half the number
//! of out-of-order matched pairs). The running count is halved after every character of
//! the first string, so early transpositions decay before the final score is taken. The
//! [verification threshold](crate::constants::DEFAULT_VERIFICATION_THRESHOLD) is
//! calibrated against this accumulation, so it must be reproduced exactly.
//!
//! One consequence is that [`jaro_distance`] is not symmetric for every input: swapping
//! the arguments changes which string drives the halving.

mod jaro;


pub use jaro::{common_prefix_len, jaro_distance, jaro_winkler, match_window};

/// A scoring function comparing a candidate text against a reference text.
pub trait Similarity: Send + Sync {
    /// Scores `candidate` against `reference`.
    fn similarity(&self, reference: &str, candidate: &str) -> f64;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

/// [`jaro_winkler`] as a [`Similarity`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JaroWinkler;

impl Similarity for JaroWinkler {
    fn similarity(&self, reference: &str, candidate: &str) -> f64 {
        jaro_winkler(reference, candidate)
    }

    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

/// Plain [`jaro_distance`] without the prefix boost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jaro;

impl Similarity for Jaro {
    fn similarity(&self, reference: &str, candidate: &str) -> f64 {
        jaro_distance(reference, candidate)
    }

    fn name(&self) -> &'static str {
        "jaro"
    }
}
