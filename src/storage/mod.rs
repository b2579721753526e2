//! Persistence of requests, miner responses, and their verification outcomes.
//!
//! Two tables are kept: `requests_responses` (one row per [`RequestRecord`]) and
//! `miners_responses` (one row per [`MinerResponseRecord`], referencing a request by
//! `r_nanoid`). Every operation returns a [`StorageResult`]; callers decide whether a
//! failure is fatal.

pub mod error;
pub mod jsonl;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod model;

pub use error::{StorageError, StorageResult};
pub use jsonl::JsonlStore;
#[cfg(any(test, feature = "mock"))]
pub use mock::MemoryStore;
pub use model::{InferenceStats, MinerResponseRecord, RequestRecord, StoredMinerResponse};

use std::collections::HashSet;

/// Table holding [`RequestRecord`]s.
pub const REQUESTS_TABLE: &str = "requests_responses";

/// Table holding [`StoredMinerResponse`]s.
pub const MINERS_TABLE: &str = "miners_responses";

/// Durable sink for verification records.
pub trait RecordStore: Send + Sync {
    /// Creates the backing tables if missing. Idempotent.
    fn setup(&self) -> StorageResult<()>;

    /// Inserts `responses` first, then `miners`.
    ///
    /// The batch is validated before anything is written: every miner record must
    /// reference a request that is already stored or part of `responses`. A batch that
    /// fails, during validation or while writing, leaves no rows behind.
    fn add_records(
        &self,
        miners: &[MinerResponseRecord],
        responses: &[RequestRecord],
    ) -> StorageResult<()>;

    /// Returns every stored request, in insertion order.
    fn load_requests(&self) -> StorageResult<Vec<RequestRecord>>;

    /// Returns every stored miner response, in insertion order.
    fn load_miner_responses(&self) -> StorageResult<Vec<StoredMinerResponse>>;
}

/// Checks a batch against the request ids already stored.
pub(crate) fn validate_batch(
    stored_ids: &HashSet<String>,
    miners: &[MinerResponseRecord],
    responses: &[RequestRecord],
) -> StorageResult<()> {
    let mut batch_ids = HashSet::with_capacity(responses.len());

    for response in responses {
        response.validate()?;

        let duplicate = stored_ids.contains(&response.r_nanoid)
            || !batch_ids.insert(response.r_nanoid.as_str());
        if duplicate {
            return Err(StorageError::DuplicateRequest {
                r_nanoid: response.r_nanoid.clone(),
            });
        }
    }

    for miner in miners {
        miner.validate()?;
        if !stored_ids.contains(&miner.r_nanoid) && !batch_ids.contains(miner.r_nanoid.as_str()) {
            return Err(StorageError::UnknownRequest {
                r_nanoid: miner.r_nanoid.clone(),
            });
        }
    }

    Ok(())
}
