//! In-process record store

use std::cell::RefCell;
use std::collections::HashMap;

use super::{RecordStore, StoreError};
use crate::data::Record;

/// Keeps records in a map for the lifetime of the process
///
/// Single-threaded by construction, matching the one-lookup-at-a-time loop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<String, Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, record: &Record) -> Result<(), StoreError> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), record.clone());
        Ok(())
    }
}
