//! # Persistence Gateway
//!
//! Loads and saves the workspace through a [`RecordStore`].
//!
//! - Load happens once, at session start.
//! - Save writes both records after every applied mutation.
//!
//! Each record falls back on its own: a missing or unreadable record is
//! logged and replaced by its seed counterpart, while the other record is
//! kept as loaded. Cross-record inconsistencies that result are tolerated and
//! surface through [`Workspace::integrity_report`].

use crate::formats::{decode_artifacts, decode_folders, encode_artifacts, encode_folders};
use crate::primitives::{ARTIFACTS_RECORD, FOLDERS_RECORD};
use crate::storage::RecordStore;
use crate::workspace::Workspace;
use crate::PlaypenError;

/// Reads and writes the two workspace records.
pub struct PersistenceGateway;

impl PersistenceGateway {
    /// Load the workspace, substituting seed data for each record that is
    /// absent or malformed.
    pub fn load(records: &impl RecordStore) -> Workspace {
        let artifacts = read_record(records, ARTIFACTS_RECORD, decode_artifacts);
        let folders = read_record(records, FOLDERS_RECORD, decode_folders);

        if matches!((&artifacts, &folders), (Ok(None), Ok(None))) {
            tracing::info!("No saved workspace, starting from defaults");
            return Workspace::seeded();
        }

        let artifacts = or_seed(artifacts, ARTIFACTS_RECORD, Workspace::seed_artifacts);
        let folders = or_seed(folders, FOLDERS_RECORD, Workspace::seed_folders);

        let ws = Workspace::from_parts(artifacts, folders);
        tracing::debug!(
            artifacts = ws.artifacts().len(),
            folders = ws.folders().len(),
            "Loaded workspace"
        );
        ws
    }

    /// Write both records.
    pub fn save(records: &mut impl RecordStore, ws: &Workspace) -> Result<(), PlaypenError> {
        let artifacts = encode_artifacts(ws.artifacts())?;
        let folders = encode_folders(ws.folders())?;
        records.put_all(&[
            (ARTIFACTS_RECORD, artifacts.as_slice()),
            (FOLDERS_RECORD, folders.as_slice()),
        ])
    }
}

fn read_record<T>(
    records: &impl RecordStore,
    key: &str,
    decode: fn(&[u8]) -> Result<T, PlaypenError>,
) -> Result<Option<T>, PlaypenError> {
    records.get(key)?.map(|bytes| decode(&bytes)).transpose()
}

/// Unwrap a loaded record, or log and fall back to `seed`.
fn or_seed<T>(
    loaded: Result<Option<T>, PlaypenError>,
    key: &str,
    seed: fn() -> T,
) -> T {
    match loaded {
        Ok(Some(value)) => value,
        Ok(None) => {
            tracing::warn!(record = key, "Record missing, using defaults");
            seed()
        }
        Err(e) => {
            tracing::warn!(record = key, "Discarding unreadable record: {e}");
            seed()
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
