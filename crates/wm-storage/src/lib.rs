//! wm-storage: durable key-value snapshots of the workout collection.

pub mod dir;
pub mod kv;
pub mod persistence;
pub mod schema;

pub use dir::DirStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use persistence::{CorruptRecord, Persistence, Snapshot, StorageKeys};
pub use schema::{RestoreError, StoredType, StoredWorkout};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {key:?}")]
    InvalidKey { key: String },
}
