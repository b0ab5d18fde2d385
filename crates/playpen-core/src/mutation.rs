//! # Mutation Engine
//!
//! Consolidates the structural edits of a [`Workspace`].
//!
//! Every operation validates first and mutates second, so a rejected
//! request leaves the Artifact Store, the Folder Index and the Active
//! Selection exactly as they were. Persistence and preview refresh are the
//! session's job; this module touches memory only.

use crate::naming::{resolve_kind, validate_name};
use crate::primitives::DEFAULT_FOLDER;
use crate::workspace::Workspace;
use crate::{Confirmation, NameRejection, PlaypenError};

/// What a successful mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (declined delete, re-select, existing placeholder).
    Unchanged,
    /// The workspace changed.
    Applied {
        /// The Active Selection now names a different artifact (or none).
        selection_changed: bool,
    },
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    #[must_use]
    pub const fn selection_changed(self) -> bool {
        matches!(
            self,
            Outcome::Applied {
                selection_changed: true
            }
        )
    }
}

/// The MutationEngine consolidates all workspace mutations.
pub struct MutationEngine;

impl MutationEngine {
    /// Create an empty artifact and file it under `folder`.
    ///
    /// `None` or an empty folder name files it under [`DEFAULT_FOLDER`].
    /// The Active Selection is not changed.
    pub fn create(
        ws: &mut Workspace,
        name: &str,
        folder: Option<&str>,
    ) -> Result<Outcome, PlaypenError> {
        validate_name(name)?;
        if ws.artifacts.contains(name) {
            return Err(PlaypenError::invalid_name(name, NameRejection::AlreadyExists));
        }
        resolve_kind(name)?;

        let folder = folder.filter(|f| !f.is_empty()).unwrap_or(DEFAULT_FOLDER);
        validate_name(folder)?;

        ws.artifacts.put(name, String::new())?;
        ws.folders.add_member(folder, name);

        tracing::debug!(artifact = name, folder, "artifact created");
        Ok(Outcome::Applied {
            selection_changed: false,
        })
    }

    /// Register an empty folder.
    ///
    /// Fails if a folder with members already uses the name. Re-creating a
    /// placeholder is accepted and changes nothing.
    pub fn create_folder(ws: &mut Workspace, name: &str) -> Result<Outcome, PlaypenError> {
        validate_name(name)?;
        if ws.folders.is_populated(name) {
            return Err(PlaypenError::invalid_name(name, NameRejection::AlreadyExists));
        }
        if ws.folders.contains_folder(name) {
            return Ok(Outcome::Unchanged);
        }

        ws.folders.create_placeholder(name);
        tracing::debug!(folder = name, "folder placeholder created");
        Ok(Outcome::Applied {
            selection_changed: false,
        })
    }

    /// Rename an artifact, keeping its content, folder and position.
    ///
    /// The kind is recomputed from `new`. If `old` was active, the selection
    /// follows the rename.
    pub fn rename(ws: &mut Workspace, old: &str, new: &str) -> Result<Outcome, PlaypenError> {
        if !ws.artifacts.contains(old) {
            return Err(PlaypenError::ArtifactNotFound(old.to_string()));
        }
        validate_name(new)?;
        if new == old {
            return Err(PlaypenError::invalid_name(new, NameRejection::Unchanged));
        }
        if ws.artifacts.contains(new) {
            return Err(PlaypenError::invalid_name(new, NameRejection::AlreadyExists));
        }

        let kind = ws.artifacts.rename(old, new)?;
        ws.folders.rename_member(old, new);

        let selection_changed = ws.active.as_deref() == Some(old);
        if selection_changed {
            ws.active = Some(new.to_string());
        }

        tracing::debug!(from = old, to = new, %kind, "artifact renamed");
        Ok(Outcome::Applied { selection_changed })
    }

    /// Delete an artifact after interactive confirmation.
    ///
    /// A declined confirmation is a no-op. Folders left empty are removed.
    /// If the deleted artifact was active, the first remaining artifact in
    /// store order becomes active, or none when the store is empty.
    pub fn delete(
        ws: &mut Workspace,
        name: &str,
        confirmation: Confirmation,
    ) -> Result<Outcome, PlaypenError> {
        if confirmation == Confirmation::Declined {
            tracing::debug!(artifact = name, "delete declined");
            return Ok(Outcome::Unchanged);
        }
        if ws.artifacts.remove(name).is_none() {
            return Err(PlaypenError::ArtifactNotFound(name.to_string()));
        }
        let emptied = ws.folders.remove_member(name);

        let selection_changed = ws.active.as_deref() == Some(name);
        if selection_changed {
            ws.active = ws.artifacts.first().map(|a| a.name.clone());
        }

        tracing::debug!(
            artifact = name,
            removed_folders = emptied.len(),
            "artifact deleted"
        );
        Ok(Outcome::Applied { selection_changed })
    }

    /// Make `name` the Active Selection.
    pub fn select(ws: &mut Workspace, name: &str) -> Result<Outcome, PlaypenError> {
        if !ws.artifacts.contains(name) {
            return Err(PlaypenError::ArtifactNotFound(name.to_string()));
        }
        if ws.active.as_deref() == Some(name) {
            return Ok(Outcome::Unchanged);
        }
        ws.active = Some(name.to_string());
        Ok(Outcome::Applied {
            selection_changed: true,
        })
    }

    /// Replace the full text of the active artifact.
    pub fn edit(ws: &mut Workspace, content: &str) -> Result<Outcome, PlaypenError> {
        let name = ws.active.as_deref().ok_or(PlaypenError::NoSelection)?;
        ws.artifacts.set_content(name, content)?;
        Ok(Outcome::Applied {
            selection_changed: false,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
