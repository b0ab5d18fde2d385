//! # Session Module
//!
//! The session controller: one workspace, one durable store, and the two
//! optional collaborators.
//!
//! Every operation follows the same sequence:
//! 1. validate and apply the change in memory (`MutationEngine`)
//! 2. persist both records
//! 3. push the new artifact to the editor if the selection moved
//! 4. refresh the preview
//!
//! A failed save is logged and never rolls back step 1.
//!
//! ## Storage Backends
//!
//! - `InMemory`: `MemoryRecords` (volatile)
//! - `Persistent`: `RedbRecords` (disk-backed ACID storage)

use crate::collaborators::{EditorSurface, Renderer};
use crate::compositor::{Compositor, PreviewUpdate};
use crate::formats::{workspace_from_bytes, workspace_to_bytes};
use crate::gateway::PersistenceGateway;
use crate::mutation::{MutationEngine, Outcome};
use crate::storage::{MemoryRecords, RecordStore, RedbRecords};
use crate::workspace::{IntegrityReport, Workspace};
use crate::{Artifact, Confirmation, PlaypenError};
use std::fmt;
use std::path::Path;

/// Log a storage error instead of propagating it.
#[inline]
fn log_failure(result: Result<(), PlaypenError>, context: &str) {
    if let Err(e) = result {
        tracing::warn!("I/O error in {}: {}", context, e);
    }
}

/// Storage backend for a Session.
#[derive(Debug)]
pub enum StorageBackend {
    /// Volatile records.
    InMemory(MemoryRecords),
    /// Disk-backed records using redb.
    Persistent(RedbRecords),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryRecords::new())
    }
}

impl RecordStore for StorageBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PlaypenError> {
        match self {
            Self::InMemory(records) => records.get(key),
            Self::Persistent(records) => records.get(key),
        }
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), PlaypenError> {
        match self {
            Self::InMemory(records) => records.put(key, value),
            Self::Persistent(records) => records.put(key, value),
        }
    }

    fn put_all(&mut self, records: &[(&str, &[u8])]) -> Result<(), PlaypenError> {
        match self {
            Self::InMemory(store) => store.put_all(records),
            Self::Persistent(store) => store.put_all(records),
        }
    }
}

/// A Session owns the workspace and drives persistence and preview.
///
/// Session does NOT implement Clone: the redb handle cannot be shared.
pub struct Session {
    /// The durable record store.
    backend: StorageBackend,
    /// Artifact Store + Folder Index + Active Selection.
    workspace: Workspace,
    /// The last published preview.
    preview: PreviewUpdate,
    renderer: Option<Box<dyn Renderer>>,
    editor: Option<Box<dyn EditorSurface>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("backend", &self.backend)
            .field("workspace", &self.workspace)
            .field("preview", &self.preview)
            .field("renderer", &self.renderer.is_some())
            .field("editor", &self.editor.is_some())
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with volatile storage and the seed workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::open(StorageBackend::default())
    }

    /// Create a session over existing in-memory records.
    #[must_use]
    pub fn with_records(records: MemoryRecords) -> Self {
        Self::open(StorageBackend::InMemory(records))
    }

    /// Create a session with persistent redb storage.
    ///
    /// Opens or creates a redb database at the given path.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, PlaypenError> {
        let records = RedbRecords::open(path)?;
        Ok(Self::open(StorageBackend::Persistent(records)))
    }

    fn open(backend: StorageBackend) -> Self {
        let workspace = PersistenceGateway::load(&backend);
        let mut session = Self {
            backend,
            workspace,
            preview: PreviewUpdate::Idle,
            renderer: None,
            editor: None,
        };
        session.refresh_preview();
        session
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StorageBackend::Persistent(_))
    }

    #[must_use]
    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }

    #[must_use]
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Look up an artifact by name.
    #[must_use]
    pub fn artifact(&self, name: &str) -> Option<&Artifact> {
        self.workspace.artifacts().get(name)
    }

    /// The active artifact.
    #[must_use]
    pub fn active(&self) -> Option<&Artifact> {
        self.workspace.active()
    }

    /// The last preview handed to the renderer.
    #[must_use]
    pub fn current_preview(&self) -> &PreviewUpdate {
        &self.preview
    }

    /// Compose the preview for any markup artifact without selecting it.
    pub fn preview_of(&self, name: &str) -> Result<String, PlaypenError> {
        let artifact = self
            .artifact(name)
            .ok_or_else(|| PlaypenError::ArtifactNotFound(name.to_string()))?;
        Compositor::compose(self.workspace.artifacts(), &artifact.name)
            .ok_or_else(|| PlaypenError::NotMarkup(name.to_string()))
    }

    #[must_use]
    pub fn integrity_report(&self) -> IntegrityReport {
        self.workspace.integrity_report()
    }

    // =========================================================================
    // COLLABORATORS
    // =========================================================================

    /// Attach the rendering collaborator and hand it the current preview.
    pub fn attach_renderer(&mut self, mut renderer: Box<dyn Renderer>) {
        renderer.present(&self.preview);
        self.renderer = Some(renderer);
    }

    /// Attach the editing collaborator and show it the active artifact.
    pub fn attach_editor(&mut self, mut editor: Box<dyn EditorSurface>) {
        editor.show(self.workspace.active());
        self.editor = Some(editor);
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Create an empty artifact in `folder` (or the default folder).
    pub fn create_artifact(
        &mut self,
        name: &str,
        folder: Option<&str>,
    ) -> Result<Outcome, PlaypenError> {
        let outcome = MutationEngine::create(&mut self.workspace, name, folder)?;
        Ok(self.settle(outcome))
    }

    /// Register an empty folder placeholder.
    pub fn create_folder(&mut self, name: &str) -> Result<Outcome, PlaypenError> {
        let outcome = MutationEngine::create_folder(&mut self.workspace, name)?;
        Ok(self.settle(outcome))
    }

    pub fn rename_artifact(&mut self, old: &str, new: &str) -> Result<Outcome, PlaypenError> {
        let outcome = MutationEngine::rename(&mut self.workspace, old, new)?;
        Ok(self.settle(outcome))
    }

    /// Delete an artifact. A declined confirmation changes nothing.
    pub fn delete_artifact(
        &mut self,
        name: &str,
        confirmation: Confirmation,
    ) -> Result<Outcome, PlaypenError> {
        let outcome = MutationEngine::delete(&mut self.workspace, name, confirmation)?;
        Ok(self.settle(outcome))
    }

    pub fn select(&mut self, name: &str) -> Result<Outcome, PlaypenError> {
        let outcome = MutationEngine::select(&mut self.workspace, name)?;
        Ok(self.settle(outcome))
    }

    /// Content change reported by the editing collaborator.
    pub fn edit(&mut self, content: &str) -> Result<Outcome, PlaypenError> {
        let outcome = MutationEngine::edit(&mut self.workspace, content)?;
        Ok(self.settle(outcome))
    }

    /// Explicit preview refresh.
    pub fn run(&mut self) -> &PreviewUpdate {
        self.refresh_preview();
        &self.preview
    }

    /// Write both records now, surfacing any storage error.
    pub fn save(&mut self) -> Result<(), PlaypenError> {
        PersistenceGateway::save(&mut self.backend, &self.workspace)
    }

    /// Reclaim space in the redb file. A no-op for in-memory sessions.
    pub fn compact(&mut self) -> Result<(), PlaypenError> {
        match &mut self.backend {
            StorageBackend::Persistent(records) => records.compact(),
            StorageBackend::InMemory(_) => Ok(()),
        }
    }

    /// Serialize the workspace into an export bundle.
    pub fn export_bundle(&self) -> Result<Vec<u8>, PlaypenError> {
        workspace_to_bytes(&self.workspace)
    }

    /// Replace the workspace with the contents of an export bundle.
    pub fn import_bundle(&mut self, bytes: &[u8]) -> Result<(), PlaypenError> {
        let workspace = workspace_from_bytes(bytes)?;
        tracing::info!(artifacts = workspace.artifacts().len(), "Importing bundle");
        self.replace_workspace(workspace);
        Ok(())
    }

    /// Discard everything and go back to the seed workspace.
    pub fn reset(&mut self) {
        tracing::info!("Resetting workspace to defaults");
        self.replace_workspace(Workspace::seeded());
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn replace_workspace(&mut self, workspace: Workspace) {
        self.workspace = workspace;
        self.persist();
        self.push_editor();
        self.refresh_preview();
    }

    fn settle(&mut self, outcome: Outcome) -> Outcome {
        if outcome.is_applied() {
            self.persist();
            if outcome.selection_changed() {
                self.push_editor();
            }
            self.refresh_preview();
        }
        outcome
    }

    fn persist(&mut self) {
        log_failure(
            PersistenceGateway::save(&mut self.backend, &self.workspace),
            "persist",
        );
    }

    fn push_editor(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.show(self.workspace.active());
        }
    }

    /// Active markup renders, no selection clears, anything else keeps the
    /// previous preview.
    fn refresh_preview(&mut self) {
        let next = match self.workspace.active() {
            Some(active) if active.is_markup() => {
                Compositor::compose(self.workspace.artifacts(), &active.name)
                    .map(PreviewUpdate::Render)
            }
            Some(_) => None,
            None => Some(PreviewUpdate::Clear),
        };

        if let Some(update) = next {
            self.preview = update;
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.present(&self.preview);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
