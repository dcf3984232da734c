//! File-backed record store
//!
//! Provides a `JsonFileStore` that keeps each record in its own
//! `{name}.json` file inside a single directory.

use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

use super::{RecordStore, StoreError};
use crate::data::Record;

/// Directory, relative to the working directory, used when none is configured
pub const DEFAULT_CACHE_DIR: &str = "pokedex";

/// Stores records as pretty-printed JSON files
///
/// Files are never refreshed: once `{name}.json` exists, it is read back as is.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Directory where record files are stored
    dir: PathBuf,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the path of the record file for the given key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", key))
    }

    /// Ensures the store directory exists
    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })
    }
}

impl RecordStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Record>, StoreError> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let record = serde_json::from_str(&content)
            .map_err(|source| StoreError::Json { path: path.clone(), source })?;
        debug!(path = %path.display(), "read cached record");
        Ok(Some(record))
    }

    /// Writes to a temporary sibling first, then renames it over the target
    fn put(&self, key: &str, record: &Record) -> Result<(), StoreError> {
        self.ensure_dir()?;

        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(record)
            .map_err(|source| StoreError::Json { path: path.clone(), source })?;

        let temp = self.temp_path_for(key);
        if let Err(source) = fs::write(&temp, json) {
            let _ = fs::remove_file(&temp);
            return Err(StoreError::Io { path: temp, source });
        }
        if let Err(source) = fs::rename(&temp, &path) {
            let _ = fs::remove_file(&temp);
            return Err(StoreError::Io { path, source });
        }

        debug!(path = %path.display(), "wrote cached record");
        Ok(())
    }

    fn location(&self, key: &str) -> Option<PathBuf> {
        Some(self.path_for(key))
    }
}
