//! # Compositor Module
//!
//! Assembles the composite preview document.
//!
//! Starting from a markup artifact, every stylesheet is spliced in front of
//! the first `</head>` as its own `<style>` block and every script in front
//! of the first `</body>` as its own `<script>` block, in store order.
//!
//! This is a textual splice, not a parse:
//! - Markup is never validated
//! - A missing marker silently skips that insertion
//! - Markers are located once, in the markup content; marker text inside a
//!   stylesheet or script never moves a later block

use crate::primitives::{BODY_CLOSE_MARKER, HEAD_CLOSE_MARKER};
use crate::store::ArtifactStore;
use crate::Kind;

/// What the rendering collaborator should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewUpdate {
    /// Nothing has been published yet.
    #[default]
    Idle,
    /// Render this composite document.
    Render(String),
    /// Clear the viewport.
    Clear,
}

impl PreviewUpdate {
    /// The document to render, if any.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        match self {
            PreviewUpdate::Render(doc) => Some(doc),
            PreviewUpdate::Idle | PreviewUpdate::Clear => None,
        }
    }
}

/// The Compositor builds ephemeral preview documents from a store snapshot.
///
/// Output is never written back into the store.
pub struct Compositor;

impl Compositor {
    /// Compose the preview for the named markup artifact.
    ///
    /// Returns `None` if the artifact is absent or not markup.
    #[must_use]
    pub fn compose(store: &ArtifactStore, markup: &str) -> Option<String> {
        let artifact = store.get(markup).filter(|a| a.is_markup())?;
        let content = artifact.content.as_str();

        let styles = Self::blocks(store, Kind::Stylesheet, "style");
        let scripts = Self::blocks(store, Kind::Script, "script");

        let mut inserts: Vec<(usize, String)> = [
            (content.find(HEAD_CLOSE_MARKER), styles),
            (content.find(BODY_CLOSE_MARKER), scripts),
        ]
        .into_iter()
        .filter_map(|(at, blocks)| at.map(|at| (at, blocks)))
        .collect();
        // Splice the later offset first so the earlier one stays valid.
        inserts.sort_by(|a, b| b.0.cmp(&a.0));

        let mut document = content.to_string();
        for (at, blocks) in inserts {
            document.insert_str(at, &blocks);
        }
        Some(document)
    }

    /// Every artifact of `kind` wrapped in its own `<tag>` block, in store order.
    fn blocks(store: &ArtifactStore, kind: Kind, tag: &str) -> String {
        store
            .of_kind(kind)
            .map(|a| format!("<{tag}>{}</{tag}>", a.content))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
