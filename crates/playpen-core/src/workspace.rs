//! # Workspace
//!
//! The state bundle of one session: Artifact Store, Folder Index and the
//! Active Selection.
//!
//! A `Workspace` holds no I/O handle. It is mutated only through
//! [`MutationEngine`](crate::MutationEngine) and read by the compositor and
//! the persistence gateway.

use crate::folders::FolderIndex;
use crate::primitives::{DEFAULT_ENTRY, DEFAULT_FOLDER, SEED_ARTIFACTS};
use crate::store::ArtifactStore;
use crate::Artifact;
use serde::{Deserialize, Serialize};

/// Artifact Store + Folder Index + Active Selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    pub(crate) artifacts: ArtifactStore,
    pub(crate) folders: FolderIndex,
    /// Name of the current artifact; references, never owns, a store key.
    pub(crate) active: Option<String>,
}

/// Structural problems found in a loaded workspace.
///
/// Mutations never produce these; they can only come from persisted data
/// that was edited or truncated outside playpen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// `(folder, member)` pairs naming an artifact the store does not have.
    pub dangling_members: Vec<(String, String)>,
    /// Artifacts no folder lists.
    pub unfiled_artifacts: Vec<String>,
    /// Folders with zero members.
    pub empty_folders: Vec<String>,
}

impl IntegrityReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dangling_members.is_empty() && self.unfiled_artifacts.is_empty()
    }
}

impl Workspace {
    /// Create an empty workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The seed workspace: one markup, one stylesheet and one script artifact
    /// grouped in the default folder, with the markup selected.
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_parts(Self::seed_artifacts(), Self::seed_folders())
    }

    /// The seed artifacts alone.
    #[must_use]
    pub fn seed_artifacts() -> ArtifactStore {
        let mut artifacts = ArtifactStore::new();
        for (name, content) in SEED_ARTIFACTS {
            // Seed names are compile-time constants with supported extensions.
            let _ = artifacts.put(name, content);
        }
        artifacts
    }

    /// The seed folder index alone: every seed artifact in the default folder.
    #[must_use]
    pub fn seed_folders() -> FolderIndex {
        let mut folders = FolderIndex::new();
        for (name, _) in SEED_ARTIFACTS {
            folders.add_member(DEFAULT_FOLDER, name);
        }
        folders
    }

    /// Assemble a workspace from loaded parts and pick the initial selection.
    ///
    /// The selection is [`DEFAULT_ENTRY`] when present, otherwise the first
    /// artifact in store order, otherwise none.
    #[must_use]
    pub fn from_parts(artifacts: ArtifactStore, folders: FolderIndex) -> Self {
        let active = if artifacts.contains(DEFAULT_ENTRY) {
            Some(DEFAULT_ENTRY.to_string())
        } else {
            artifacts.first().map(|a| a.name.clone())
        };
        Self {
            artifacts,
            folders,
            active,
        }
    }

    #[must_use]
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    #[must_use]
    pub fn folders(&self) -> &FolderIndex {
        &self.folders
    }

    /// Name of the active artifact.
    #[must_use]
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active artifact.
    #[must_use]
    pub fn active(&self) -> Option<&Artifact> {
        self.active.as_deref().and_then(|name| self.artifacts.get(name))
    }

    /// Cross-check the store against the index.
    #[must_use]
    pub fn integrity_report(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();

        for (folder, members) in self.folders.iter() {
            if members.is_empty() {
                report.empty_folders.push(folder.to_string());
            }
            for member in members {
                if !self.artifacts.contains(member) {
                    report
                        .dangling_members
                        .push((folder.to_string(), member.clone()));
                }
            }
        }

        report.unfiled_artifacts = self
            .artifacts
            .names()
            .filter(|name| !self.folders.is_member(name))
            .map(str::to_string)
            .collect();

        report
    }
}

// =============================================================================
// TESTS
// =============================================================================
