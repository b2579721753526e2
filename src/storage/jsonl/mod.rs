//! File-backed record store (one JSON object per line, one file per table).


use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::error::{StorageError, StorageResult};
use super::model::{MinerResponseRecord, RequestRecord, StoredMinerResponse};
use super::{MINERS_TABLE, REQUESTS_TABLE, RecordStore, validate_batch};

const JSONL_EXTENSION: &str = "jsonl";

/// Request ids and the next miner row id, loaded once and kept in step with each append.
#[derive(Debug, Default)]
struct TableIndex {
    request_ids: HashSet<String>,
    next_miner_id: u64,
}

#[derive(Debug)]
/// Appends records to `<root>/<table>.jsonl`.
///
/// Writers within one process are serialized; concurrent processes sharing a root are
/// not coordinated. Ids already on disk are read once (in [`setup`](RecordStore::setup)
/// or on the first insert), so rows appended behind the store's back are not seen.
pub struct JsonlStore {
    storage_path: PathBuf,
    index: Mutex<Option<TableIndex>>,
}

impl JsonlStore {
    /// Creates a store rooted at `storage_path`.
    ///
    /// Nothing is touched on disk until [`setup`](RecordStore::setup).
    pub fn new(storage_path: PathBuf) -> Self {
        Self {
            storage_path,
            index: Mutex::new(None),
        }
    }

    /// Returns the root storage directory.
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.storage_path.join(format!("{}.{}", table, JSONL_EXTENSION))
    }

    fn ensure_initialized(&self) -> StorageResult<()> {
        let ready = [REQUESTS_TABLE, MINERS_TABLE]
            .iter()
            .all(|table| self.table_path(table).is_file());

        if !ready {
            return Err(StorageError::NotInitialized {
                path: self.storage_path.clone(),
            });
        }
        Ok(())
    }

    fn read_table<T: DeserializeOwned>(&self, table: &str) -> StorageResult<Vec<T>> {
        let path = self.table_path(table);
        let reader = BufReader::new(File::open(&path)?);
        let mut rows = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let row = serde_json::from_str(&line).map_err(|e| StorageError::Corrupt {
                path: path.clone(),
                line: index + 1,
                reason: e.to_string(),
            })?;
            rows.push(row);
        }

        Ok(rows)
    }

    fn load_index(&self) -> StorageResult<TableIndex> {
        let request_ids = self
            .read_table::<RequestRecord>(REQUESTS_TABLE)?
            .into_iter()
            .map(|r| r.r_nanoid)
            .collect();
        let next_miner_id = self
            .read_table::<StoredMinerResponse>(MINERS_TABLE)?
            .last()
            .map_or(1, |row| row.id + 1);

        Ok(TableIndex {
            request_ids,
            next_miner_id,
        })
    }

    fn insert_batch(
        &self,
        index: &mut TableIndex,
        miners: &[MinerResponseRecord],
        responses: &[RequestRecord],
    ) -> StorageResult<()> {
        validate_batch(&index.request_ids, miners, responses)?;

        let stored: Vec<StoredMinerResponse> = miners
            .iter()
            .zip(index.next_miner_id..)
            .map(|(record, id)| StoredMinerResponse {
                id,
                record: record.clone(),
            })
            .collect();

        append_all(&[
            (self.table_path(REQUESTS_TABLE), encode_rows(responses)?),
            (self.table_path(MINERS_TABLE), encode_rows(&stored)?),
        ])?;
        debug!(count = responses.len(), table = REQUESTS_TABLE, "Records inserted");
        debug!(count = stored.len(), table = MINERS_TABLE, "Records inserted");

        index
            .request_ids
            .extend(responses.iter().map(|r| r.r_nanoid.clone()));
        index.next_miner_id += stored.len() as u64;
        Ok(())
    }
}

fn encode_rows<T: Serialize>(rows: &[T]) -> StorageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    for row in rows {
        serde_json::to_writer(&mut buffer, row)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        buffer.push(b'\n');
    }
    Ok(buffer)
}

/// Appends each buffer to its file in order.
///
/// If any append fails, files already appended to are truncated back to their prior
/// length, so either every buffer lands or none does.
fn append_all(writes: &[(PathBuf, Vec<u8>)]) -> StorageResult<()> {
    let mut appended: Vec<(&Path, File, u64)> = Vec::with_capacity(writes.len());

    for (path, buffer) in writes {
        if buffer.is_empty() {
            continue;
        }

        match append_synced(path, buffer) {
            Ok((file, prior_len)) => appended.push((path.as_path(), file, prior_len)),
            Err(e) => {
                for (path, file, prior_len) in appended.iter().rev() {
                    rollback(path, file, *prior_len);
                }
                return Err(e.into());
            }
        }
    }

    Ok(())
}

fn append_synced(path: &Path, buffer: &[u8]) -> io::Result<(File, u64)> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    let prior_len = file.metadata()?.len();

    if let Err(e) = file.write_all(buffer).and_then(|()| file.sync_all()) {
        rollback(path, &file, prior_len);
        return Err(e);
    }
    Ok((file, prior_len))
}

fn rollback(path: &Path, file: &File, len: u64) {
    if let Err(e) = file.set_len(len).and_then(|()| file.sync_all()) {
        warn!(path = %path.display(), len, error = %e, "Failed to roll back partial append");
    }
}

impl RecordStore for JsonlStore {
    fn setup(&self) -> StorageResult<()> {
        if !self.storage_path.exists() {
            fs::create_dir_all(&self.storage_path).map_err(|_| {
                StorageError::StorageUnavailable {
                    path: self.storage_path.clone(),
                }
            })?;
        }

        for table in [REQUESTS_TABLE, MINERS_TABLE] {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.table_path(table))?;
            info!(table, path = %self.storage_path.display(), "Table ready");
        }

        let mut index = self.index.lock();
        *index = Some(self.load_index()?);
        Ok(())
    }

    fn add_records(
        &self,
        miners: &[MinerResponseRecord],
        responses: &[RequestRecord],
    ) -> StorageResult<()> {
        let mut guard = self.index.lock();
        self.ensure_initialized()?;

        let mut index = match guard.take() {
            Some(index) => index,
            None => self.load_index()?,
        };
        let result = self.insert_batch(&mut index, miners, responses);
        *guard = Some(index);
        result
    }

    fn load_requests(&self) -> StorageResult<Vec<RequestRecord>> {
        self.ensure_initialized()?;
        self.read_table(REQUESTS_TABLE)
    }

    fn load_miner_responses(&self) -> StorageResult<Vec<StoredMinerResponse>> {
        self.ensure_initialized()?;
        self.read_table(MINERS_TABLE)
    }
}
