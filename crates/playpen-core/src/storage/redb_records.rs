//! # redb-backed Record Storage
//!
//! A disk-backed record store using the redb embedded database.
//!
//! Provides:
//! - ACID transactions (both workspace records commit together)
//! - Crash safety (copy-on-write B-trees)
//! - Zero configuration
//!
//! ## Integration with Session
//!
//! `RedbRecords` is the persistent storage backend of a playpen session.
//! Every mutation is written through before the next one is accepted.

use super::RecordStore;
use crate::PlaypenError;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;

/// Table for records: key string -> raw record bytes
const RECORDS: TableDefinition<&str, &[u8]> = TableDefinition::new("records");

/// A disk-backed record store using redb.
pub struct RedbRecords {
    /// The redb database handle.
    db: Database,
}

impl std::fmt::Debug for RedbRecords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbRecords").finish_non_exhaustive()
    }
}

impl RedbRecords {
    /// Open or create a record database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PlaypenError> {
        let db =
            Database::create(path.as_ref()).map_err(|e| PlaypenError::IoError(e.to_string()))?;

        // Initialize the table if it doesn't exist
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| PlaypenError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(RECORDS)
                .map_err(|e| PlaypenError::IoError(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| PlaypenError::IoError(e.to_string()))?;
        }

        Ok(Self { db })
    }

    /// Compact the database (optional optimization).
    pub fn compact(&mut self) -> Result<(), PlaypenError> {
        self.db
            .compact()
            .map_err(|e| PlaypenError::IoError(e.to_string()))?;
        Ok(())
    }
}

impl RecordStore for RedbRecords {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PlaypenError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| PlaypenError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(RECORDS)
            .map_err(|e| PlaypenError::IoError(e.to_string()))?;

        let value = table
            .get(key)
            .map_err(|e| PlaypenError::IoError(e.to_string()))?
            .map(|data| data.value().to_vec());
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), PlaypenError> {
        self.put_all(&[(key, value)])
    }

    fn put_all(&mut self, records: &[(&str, &[u8])]) -> Result<(), PlaypenError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| PlaypenError::IoError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(RECORDS)
                .map_err(|e| PlaypenError::IoError(e.to_string()))?;
            for (key, value) in records {
                table
                    .insert(*key, *value)
                    .map_err(|e| PlaypenError::IoError(e.to_string()))?;
            }
        }
        write_txn
            .commit()
            .map_err(|e| PlaypenError::IoError(e.to_string()))?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
