//! Key/value storage for persisted client state
//!
//! Provides pluggable backends:
//! - `file`: a JSON object on disk, rewritten on every mutation (default)
//! - `memory`: an in-process map, used by tests and dry runs

/// File-backed key/value storage
pub mod file;
/// In-memory key/value storage
pub mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

/// Errors raised while persisting state
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the storage file failed
    #[error("storage I/O failed for {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The storage file is not a JSON object of strings
    #[error("storage file {} is not valid JSON: {source}", path.display())]
    Json {
        /// File being decoded or encoded
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value storage with the same surface as browser local storage
pub trait KeyValueStore {
    /// Read a value, `None` when the key is absent
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value, persisting immediately
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key; removing an absent key is not an error
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;

    /// All keys currently present, in sorted order
    fn keys(&self) -> Vec<String>;
}
