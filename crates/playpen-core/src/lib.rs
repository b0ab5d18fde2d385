//! # playpen-core
//!
//! The workspace engine for playpen: a small set of named, typed text
//! artifacts grouped in folders, persisted to a key-value store, and
//! composed into a single live preview document.
//!
//! ## Layers
//!
//! - `store` / `folders` / `workspace`: the in-memory model
//! - `mutation`: create, rename, delete, select, edit
//! - `gateway` / `storage` / `formats`: durable records and export bundles
//! - `compositor`: the preview document
//! - `session`: ties the above together with the UI collaborators
//!
//! ## Architectural Constraints
//!
//! - Single writer: every operation runs to completion before the next
//! - No async, no network dependencies
//! - Artifact content is never executed or parsed, only spliced

// =============================================================================
// MODULES
// =============================================================================

pub mod collaborators;
pub mod compositor;
pub mod folders;
pub mod formats;
pub mod gateway;
pub mod mutation;
pub mod naming;
pub mod primitives;
pub mod session;
pub mod settings;
pub mod storage;
pub mod store;
pub mod types;
pub mod workspace;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Artifact, Confirmation, Kind, NameRejection, PlaypenError};

// =============================================================================
// RE-EXPORTS: Workspace Engine
// =============================================================================

pub use collaborators::{EditorSurface, Renderer};
pub use compositor::{Compositor, PreviewUpdate};
pub use folders::FolderIndex;
pub use gateway::PersistenceGateway;
pub use mutation::{MutationEngine, Outcome};
pub use naming::{is_supported, resolve_kind};
pub use session::{Session, StorageBackend};
pub use settings::{EditorOptions, EditorSettings, Theme, ThemePalette};
pub use storage::{MemoryRecords, RecordStore, RedbRecords};
pub use store::ArtifactStore;
pub use workspace::{IntegrityReport, Workspace};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{BundleHeader, MAX_BUNDLE_SIZE, workspace_from_bytes, workspace_to_bytes};
