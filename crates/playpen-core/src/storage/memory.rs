//! In-memory record store.

use super::RecordStore;
use crate::PlaypenError;
use std::collections::BTreeMap;

/// Volatile record store backed by a `BTreeMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecords {
    records: BTreeMap<String, Vec<u8>>,
}

impl MemoryRecords {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryRecords {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PlaypenError> {
        Ok(self.records.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), PlaypenError> {
        self.records.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
