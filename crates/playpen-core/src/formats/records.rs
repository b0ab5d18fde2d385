//! # Record Format
//!
//! JSON encoding of the two durable records.
//!
//! - `artifacts`: `{ "<name>": { "content": "<text>", "type": "<language>" } }`
//! - `folders`: `{ "<folder>": ["<artifact>", ...] }`
//!
//! Object keys appear in insertion order. Decoding failures are reported as
//! `PersistenceCorrupt`; the gateway decides what to do with them.

use crate::folders::FolderIndex;
use crate::store::ArtifactStore;
use crate::PlaypenError;

/// Encode the Artifact Store record.
pub fn encode_artifacts(store: &ArtifactStore) -> Result<Vec<u8>, PlaypenError> {
    serde_json::to_vec(store).map_err(|e| PlaypenError::SerializationError(e.to_string()))
}

/// Encode the Folder Index record. Empty placeholder folders are omitted.
pub fn encode_folders(folders: &FolderIndex) -> Result<Vec<u8>, PlaypenError> {
    serde_json::to_vec(folders).map_err(|e| PlaypenError::SerializationError(e.to_string()))
}

/// Decode the Artifact Store record.
pub fn decode_artifacts(bytes: &[u8]) -> Result<ArtifactStore, PlaypenError> {
    serde_json::from_slice(bytes).map_err(|e| PlaypenError::PersistenceCorrupt(e.to_string()))
}

/// Decode the Folder Index record.
pub fn decode_folders(bytes: &[u8]) -> Result<FolderIndex, PlaypenError> {
    serde_json::from_slice(bytes).map_err(|e| PlaypenError::PersistenceCorrupt(e.to_string()))
}
