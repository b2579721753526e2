//! Cross-cutting, shared constants.
//!
//! # Calibration Invariants
//!
//! The verification threshold was calibrated against the exact arithmetic in
//! [`crate::similarity`], including its transposition accumulation. Changing any of
//! the similarity constants below shifts every score and invalidates the threshold.

/// Minimum Jaro-Winkler score for a candidate to be accepted.
pub const DEFAULT_VERIFICATION_THRESHOLD: f64 = 0.97;

/// A candidate shorter than this fraction of the reference is rejected outright.
pub const DEFAULT_MIN_LENGTH_RATIO: f64 = 0.8;

/// Fraction of the longer input used to size the Jaro match window.
pub const MATCH_WINDOW_FACTOR: f64 = 0.75;

/// Jaro scores must exceed this before the Winkler prefix boost applies.
pub const WINKLER_BOOST_THRESHOLD: f64 = 0.7;

/// Per-character weight of the shared prefix.
pub const WINKLER_PREFIX_SCALE: f64 = 0.25;

/// Longest shared prefix that contributes to the boost.
pub const WINKLER_MAX_PREFIX: usize = 4;

/// Maximum length of id, key and timestamp fields in persisted records.
pub const MAX_ID_LEN: usize = 48;

/// Maximum length of the version field in persisted records.
pub const MAX_VERSION_LEN: usize = 10;
