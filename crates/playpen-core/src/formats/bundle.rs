//! # Bundle Format
//!
//! Binary export format for a whole workspace.
//!
//! Format: Header (5 bytes) + postcard-serialized workspace data.
//! - 4 bytes: Magic ("PLAY")
//! - 1 byte: Version
//!
//! The payload carries the Artifact Store and the Folder Index. The active
//! selection is not part of a bundle; it is recomputed on import.
//!
//! ## Limits
//!
//! Size and header are checked before the payload is parsed, so a truncated
//! or oversized file is rejected without allocating for its contents.

use crate::folders::FolderIndex;
use crate::primitives;
use crate::store::ArtifactStore;
use crate::workspace::Workspace;
use crate::PlaypenError;
use serde::{Deserialize, Serialize};

/// Maximum accepted bundle size (64 MB).
pub const MAX_BUNDLE_SIZE: usize = 64 * 1024 * 1024;

/// Header length in bytes.
const HEADER_LEN: usize = 5;

// =============================================================================
// HEADER
// =============================================================================

/// The bundle header precedes all workspace data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl BundleHeader {
    /// Create a header for the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    pub fn validate(&self) -> Result<(), PlaypenError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(PlaypenError::SerializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(PlaypenError::SerializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PlaypenError> {
        if bytes.len() < HEADER_LEN {
            return Err(PlaypenError::SerializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for BundleHeader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
struct BundlePayload {
    artifacts: ArtifactStore,
    folders: FolderIndex,
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a workspace to bytes (header + payload).
pub fn workspace_to_bytes(workspace: &Workspace) -> Result<Vec<u8>, PlaypenError> {
    let payload = BundlePayload {
        artifacts: workspace.artifacts.clone(),
        folders: workspace.folders.clone(),
    };
    let payload = postcard::to_stdvec(&payload)
        .map_err(|e| PlaypenError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_LEN + payload.len());
    result.extend_from_slice(&BundleHeader::new().to_bytes());
    result.extend_from_slice(&payload);
    Ok(result)
}

/// Deserialize a workspace from bytes.
///
/// The returned workspace gets the usual initial selection.
pub fn workspace_from_bytes(bytes: &[u8]) -> Result<Workspace, PlaypenError> {
    if bytes.len() < HEADER_LEN {
        return Err(PlaypenError::SerializationError(format!(
            "Data too short: minimum {HEADER_LEN} bytes required"
        )));
    }
    if bytes.len() > MAX_BUNDLE_SIZE {
        return Err(PlaypenError::SerializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_BUNDLE_SIZE
        )));
    }

    BundleHeader::from_bytes(bytes)?.validate()?;

    let payload: BundlePayload = postcard::from_bytes(&bytes[HEADER_LEN..]).map_err(|e| {
        PlaypenError::SerializationError(format!("Failed to deserialize bundle: {e}"))
    })?;

    Ok(Workspace::from_parts(payload.artifacts, payload.folders))
}

// =============================================================================
// TESTS
// =============================================================================
