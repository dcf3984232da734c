//! Local store for canonical Pokémon records
//!
//! The resolver only sees the [`RecordStore`] trait. [`JsonFileStore`] keeps one
//! pretty-printed JSON file per name on disk; [`MemoryStore`] keeps records in
//! process and is handy wherever disk is unwanted.

mod file_store;
mod memory;

pub use file_store::{JsonFileStore, DEFAULT_CACHE_DIR};
pub use memory::MemoryStore;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::Record;

/// Errors raised while reading or writing the local store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stored record could not be encoded or decoded
    #[error("invalid JSON in {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key/value store mapping a normalized name to at most one record
pub trait RecordStore {
    /// Reads the record stored under `key`
    ///
    /// # Arguments
    /// * `key` - Normalized (lowercase) Pokémon name
    ///
    /// # Returns
    /// * `Ok(Some(Record))` if a record is stored
    /// * `Ok(None)` if nothing is stored under `key`
    /// * `Err(StoreError)` if the stored entry cannot be read or decoded
    fn get(&self, key: &str) -> Result<Option<Record>, StoreError>;

    /// Stores `record` under `key`
    ///
    /// # Arguments
    /// * `key` - Normalized (lowercase) Pokémon name
    /// * `record` - The record to persist
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(StoreError)` if the record could not be written
    fn put(&self, key: &str, record: &Record) -> Result<(), StoreError>;

    /// Where `key` lives on disk, for stores that have such a place
    fn location(&self, _key: &str) -> Option<PathBuf> {
        None
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn get(&self, key: &str) -> Result<Option<Record>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, record: &Record) -> Result<(), StoreError> {
        (**self).put(key, record)
    }

    fn location(&self, key: &str) -> Option<PathBuf> {
        (**self).location(key)
    }
}
