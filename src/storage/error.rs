use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors returned by record stores.
pub enum StorageError {
    /// IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A stored line could not be decoded.
    #[error("corrupt record at {path}:{line}: {reason}")]
    Corrupt {
        /// File containing the record.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Decoder message.
        reason: String,
    },

    /// Storage root could not be created.
    #[error("storage path unavailable: {path}")]
    StorageUnavailable {
        /// Path that was unavailable.
        path: PathBuf,
    },

    /// Records were written before [`setup`](super::RecordStore::setup).
    #[error("record store not initialized: {path}")]
    NotInitialized {
        /// Storage root.
        path: PathBuf,
    },

    /// A field exceeds its length limit.
    #[error("field '{field}' is {len} chars, limit is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A miner response references a request that was never stored.
    #[error("unknown request id: {r_nanoid}")]
    UnknownRequest { r_nanoid: String },

    /// A request id is already stored (or repeated within the batch).
    #[error("duplicate request id: {r_nanoid}")]
    DuplicateRequest { r_nanoid: String },
}

/// Convenience result type for record store operations.
pub type StorageResult<T> = Result<T, StorageError>;
