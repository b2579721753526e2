//! Verity library crate (used by the `verity` binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Core
//! - [`jaro_distance`], [`jaro_winkler`] - String similarity
//! - [`check_tokens`] - Accept/reject a candidate against its reference
//! - [`TokenVerifier`], [`VerifierConfig`], [`Verdict`] - Configurable verification
//!
//! ## Collaborators
//! - [`RecordStore`], [`JsonlStore`] - Persistence of requests and miner responses
//! - [`format_status`], [`Metagraph`] - Status lines from network state
//! - [`normalize`], [`safe_mean`] - Numeric helpers
//! - [`batch::run`] - Line-oriented batch verification
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - `VERITY_*` environment configuration
//!
//! ## Test/Mock Support
//! [`MemoryStore`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod batch;
pub mod config;
pub mod constants;
pub mod report;
pub mod similarity;
pub mod stats;
pub mod storage;
pub mod verification;

pub use batch::{JobOutcome, MinerInfo, RunSummary, VerificationJob};
pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_MIN_LENGTH_RATIO, DEFAULT_VERIFICATION_THRESHOLD};
pub use report::{Metagraph, NeuronStats, ReportError, Role, format_status};
pub use similarity::{Jaro, JaroWinkler, Similarity, jaro_distance, jaro_winkler};
pub use stats::{StatsError, normalize, normalize_unit, safe_mean};
#[cfg(any(test, feature = "mock"))]
pub use storage::MemoryStore;
pub use storage::{
    InferenceStats, JsonlStore, MinerResponseRecord, RecordStore, RequestRecord, StorageError,
    StorageResult, StoredMinerResponse,
};
pub use verification::{TokenVerifier, Verdict, VerifierConfig, check_tokens};
