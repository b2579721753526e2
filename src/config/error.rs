//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Threshold is not a finite value in `[0, 1]`.
    #[error("invalid threshold {value}: must be between 0.0 and 1.0")]
    InvalidThreshold { value: f64 },

    /// Length ratio is negative or not finite.
    #[error("invalid minimum length ratio {value}: must be a finite, non-negative number")]
    InvalidLengthRatio { value: f64 },

    /// An environment variable could not be parsed as a number.
    #[error("failed to parse {name}='{value}': {source}")]
    FloatParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
