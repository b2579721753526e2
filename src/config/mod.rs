//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `VERITY_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_MIN_LENGTH_RATIO, DEFAULT_VERIFICATION_THRESHOLD};
use crate::verification::VerifierConfig;

/// Runtime configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERITY_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Acceptance threshold. Default: `0.97`.
    pub threshold: f64,

    /// Length floor as a fraction of the reference length. Default: `0.8`.
    pub min_length_ratio: f64,

    /// Directory holding persisted records. Default: `./.data`.
    pub storage_path: PathBuf,

    /// Persist every verdict to [`storage_path`](Self::storage_path). Default: `false`.
    pub record: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_VERIFICATION_THRESHOLD,
            min_length_ratio: DEFAULT_MIN_LENGTH_RATIO,
            storage_path: PathBuf::from("./.data"),
            record: false,
        }
    }
}

impl Config {
    const ENV_THRESHOLD: &'static str = "VERITY_THRESHOLD";
    const ENV_MIN_LENGTH_RATIO: &'static str = "VERITY_MIN_LENGTH_RATIO";
    const ENV_STORAGE_PATH: &'static str = "VERITY_STORAGE_PATH";
    const ENV_RECORD: &'static str = "VERITY_RECORD";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let threshold = Self::parse_f64_from_env(Self::ENV_THRESHOLD, defaults.threshold)?;
        let min_length_ratio =
            Self::parse_f64_from_env(Self::ENV_MIN_LENGTH_RATIO, defaults.min_length_ratio)?;
        let storage_path = Self::parse_path_from_env(Self::ENV_STORAGE_PATH, defaults.storage_path);
        let record = Self::parse_bool_from_env(Self::ENV_RECORD, defaults.record);

        Ok(Self {
            threshold,
            min_length_ratio,
            storage_path,
            record,
        })
    }

    /// Validates calibration values and the storage path (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.verifier_config().validate()?;

        if self.storage_path.exists() && !self.storage_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.storage_path.clone(),
            });
        }

        Ok(())
    }

    /// Calibration subset consumed by [`TokenVerifier`](crate::verification::TokenVerifier).
    pub fn verifier_config(&self) -> VerifierConfig {
        VerifierConfig {
            threshold: self.threshold,
            min_length_ratio: self.min_length_ratio,
        }
    }

    fn parse_f64_from_env(var_name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::FloatParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .ok()
            .map(|v| {
                matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(default)
    }
}
