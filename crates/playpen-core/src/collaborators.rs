//! # Collaborators
//!
//! The two outside parties a [`Session`](crate::Session) talks to.
//!
//! - [`Renderer`]: shows the composite preview in an isolated viewport. The
//!   core never executes artifact content itself.
//! - [`EditorSurface`]: displays the active artifact for editing and reports
//!   content changes back through `Session::edit`.
//!
//! Both are optional; a headless session simply keeps the last preview.

use crate::compositor::PreviewUpdate;
use crate::Artifact;

/// Receives preview updates.
pub trait Renderer: Send + Sync {
    fn present(&mut self, update: &PreviewUpdate);
}

/// Receives the active artifact whenever the selection changes.
///
/// `None` means nothing is selected and the surface should be cleared.
pub trait EditorSurface: Send + Sync {
    fn show(&mut self, artifact: Option<&Artifact>);
}
