use std::collections::HashSet;
use std::path::PathBuf;

use parking_lot::RwLock;

use super::error::{StorageError, StorageResult};
use super::model::{MinerResponseRecord, RequestRecord, StoredMinerResponse};
use super::{RecordStore, validate_batch};

#[derive(Default)]
struct Tables {
    initialized: bool,
    requests: Vec<RequestRecord>,
    miners: Vec<StoredMinerResponse>,
}

/// In-memory [`RecordStore`] with the same validation rules as [`JsonlStore`](super::JsonlStore).
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_count(&self) -> usize {
        self.tables.read().requests.len()
    }

    pub fn miner_response_count(&self) -> usize {
        self.tables.read().miners.len()
    }

    fn not_initialized() -> StorageError {
        StorageError::NotInitialized {
            path: PathBuf::from(":memory:"),
        }
    }
}

impl RecordStore for MemoryStore {
    fn setup(&self) -> StorageResult<()> {
        self.tables.write().initialized = true;
        Ok(())
    }

    fn add_records(
        &self,
        miners: &[MinerResponseRecord],
        responses: &[RequestRecord],
    ) -> StorageResult<()> {
        let mut tables = self.tables.write();
        if !tables.initialized {
            return Err(Self::not_initialized());
        }

        let stored_ids: HashSet<String> =
            tables.requests.iter().map(|r| r.r_nanoid.clone()).collect();
        validate_batch(&stored_ids, miners, responses)?;

        tables.requests.extend_from_slice(responses);

        let next_id = tables.miners.last().map_or(1, |row| row.id + 1);
        for (record, id) in miners.iter().zip(next_id..) {
            tables.miners.push(StoredMinerResponse {
                id,
                record: record.clone(),
            });
        }

        Ok(())
    }

    fn load_requests(&self) -> StorageResult<Vec<RequestRecord>> {
        let tables = self.tables.read();
        if !tables.initialized {
            return Err(Self::not_initialized());
        }
        Ok(tables.requests.clone())
    }

    fn load_miner_responses(&self) -> StorageResult<Vec<StoredMinerResponse>> {
        let tables = self.tables.read();
        if !tables.initialized {
            return Err(Self::not_initialized());
        }
        Ok(tables.miners.clone())
    }
}
