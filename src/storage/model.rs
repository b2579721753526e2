use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{MAX_ID_LEN, MAX_VERSION_LEN};
use crate::verification::Verdict;

use super::error::{StorageError, StorageResult};

/// Timing and output of one miner inference, with its verification outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceStats {
    /// Seconds until the first token arrived.
    pub time_to_first_token: f64,
    /// Seconds from the first to the last token.
    pub time_for_all_tokens: f64,
    /// Seconds for the whole request.
    pub total_time: f64,
    pub tokens_per_second: f64,
    /// Streamed tokens, in order.
    pub tokens: Vec<String>,
    /// Full response text.
    pub response: String,
    /// Whether `response` matched the ground truth.
    pub verified: bool,
}

impl InferenceStats {
    /// Records `verdict` as this inference's verification outcome.
    pub fn apply_verdict(&mut self, verdict: &Verdict) {
        self.verified = verdict.is_verified();
    }
}

/// A request sent to miners, with the ground-truth output it was verified against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Unique request id.
    pub r_nanoid: String,
    /// Block height at which the request was issued.
    pub block: u64,
    /// Issue time (RFC 3339, UTC).
    pub timestamp: String,
    pub sampling_params: Value,
    pub ground_truth: Value,
}

impl RequestRecord {
    /// Creates a record with a fresh id and the current UTC time.
    pub fn new(block: u64, sampling_params: Value, ground_truth: Value) -> Self {
        Self {
            r_nanoid: uuid::Uuid::new_v4().simple().to_string(),
            block,
            timestamp: chrono::Utc::now().to_rfc3339(),
            sampling_params,
            ground_truth,
        }
    }

    pub fn validate(&self) -> StorageResult<()> {
        check_len("r_nanoid", &self.r_nanoid, MAX_ID_LEN)?;
        check_len("timestamp", &self.timestamp, MAX_ID_LEN)
    }
}

/// One miner's response to a [`RequestRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerResponseRecord {
    /// Id of the request this responds to.
    pub r_nanoid: String,
    pub hotkey: String,
    pub coldkey: String,
    pub block: u64,
    pub uid: u16,
    pub stats: InferenceStats,
    /// Miner software version.
    pub version: String,
}

impl MinerResponseRecord {
    pub fn validate(&self) -> StorageResult<()> {
        check_len("r_nanoid", &self.r_nanoid, MAX_ID_LEN)?;
        check_len("hotkey", &self.hotkey, MAX_ID_LEN)?;
        check_len("coldkey", &self.coldkey, MAX_ID_LEN)?;
        check_len("version", &self.version, MAX_VERSION_LEN)
    }
}

/// A persisted [`MinerResponseRecord`] with its store-assigned serial id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMinerResponse {
    pub id: u64,
    #[serde(flatten)]
    pub record: MinerResponseRecord,
}

fn check_len(field: &'static str, value: &str, max: usize) -> StorageResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(StorageError::FieldTooLong { field, len, max });
    }
    Ok(())
}
