//! # Record Storage
//!
//! The durable key-value store behind the persistence gateway.
//!
//! A record store holds opaque byte records under string keys. Two
//! implementations are provided:
//! - `MemoryRecords`: volatile, for tests and throwaway sessions
//! - `RedbRecords`: disk-backed ACID storage using redb

mod memory;
mod redb_records;

pub use memory::MemoryRecords;
pub use redb_records::RedbRecords;

use crate::PlaypenError;

/// A durable key-value store of named records.
///
/// Reads and writes are synchronous and run to completion.
pub trait RecordStore {
    /// Read a record. `Ok(None)` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PlaypenError>;

    /// Write a record, replacing any previous value.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), PlaypenError>;

    /// Write several records at once.
    ///
    /// The default writes them one by one; backends with transactions
    /// should override this to commit them together.
    fn put_all(&mut self, records: &[(&str, &[u8])]) -> Result<(), PlaypenError> {
        for (key, value) in records {
            self.put(key, value)?;
        }
        Ok(())
    }
}
