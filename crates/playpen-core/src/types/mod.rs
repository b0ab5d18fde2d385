//! # Core Type Definitions
//!
//! This module contains the value types shared by every playpen component:
//! - Content kinds (`Kind`)
//! - The artifact record (`Artifact`)
//! - Delete confirmation tokens (`Confirmation`)
//! - Error types (`PlaypenError`, `NameRejection`)
//!
//! ## Ordering Guarantees
//!
//! Lookups use `BTreeMap`. Where order is observable (store iteration,
//! folder listing, folder members) it is insertion order, tracked
//! explicitly by the owning container.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// KIND
// =============================================================================

/// The content kind of an artifact.
///
/// Derived from the extension of the artifact name and never set directly.
/// The serialized form is the editor language id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// `.html`
    #[serde(rename = "html")]
    Markup,
    /// `.css`
    #[serde(rename = "css")]
    Stylesheet,
    /// `.js`
    #[serde(rename = "javascript")]
    Script,
    /// `.ts`
    #[serde(rename = "typescript")]
    TypedScript,
    /// `.py`
    #[serde(rename = "python")]
    DynamicScript,
    /// `.php`
    #[serde(rename = "php")]
    ServerScript,
}

impl Kind {
    /// Every supported kind, in resolver table order.
    pub const ALL: [Kind; 6] = [
        Kind::Markup,
        Kind::Stylesheet,
        Kind::Script,
        Kind::TypedScript,
        Kind::DynamicScript,
        Kind::ServerScript,
    ];

    /// The extension (without separator) that resolves to this kind.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Kind::Markup => "html",
            Kind::Stylesheet => "css",
            Kind::Script => "js",
            Kind::TypedScript => "ts",
            Kind::DynamicScript => "py",
            Kind::ServerScript => "php",
        }
    }

    /// The language id handed to the editing collaborator.
    #[must_use]
    pub const fn language_id(self) -> &'static str {
        match self {
            Kind::Markup => "html",
            Kind::Stylesheet => "css",
            Kind::Script => "javascript",
            Kind::TypedScript => "typescript",
            Kind::DynamicScript => "python",
            Kind::ServerScript => "php",
        }
    }

    #[must_use]
    pub const fn is_markup(self) -> bool {
        matches!(self, Kind::Markup)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language_id())
    }
}

// =============================================================================
// ARTIFACT
// =============================================================================

/// A named, typed text artifact.
///
/// `kind` always matches the extension of `name`; the only way to change
/// the kind is to rename the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique name, including the extension.
    pub name: String,
    /// Arbitrary text content.
    pub content: String,
    /// Kind resolved from the name.
    pub kind: Kind,
}

impl Artifact {
    /// Create a new artifact.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            kind,
        }
    }

    #[must_use]
    pub fn is_markup(&self) -> bool {
        self.kind.is_markup()
    }
}

// =============================================================================
// CONFIRMATION
// =============================================================================

/// Outcome of the interactive delete confirmation.
///
/// The prompt itself belongs to the UI; the core only sees the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Why a proposed artifact or folder name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRejection {
    /// The name is empty.
    Empty,
    /// Another artifact (or populated folder) already uses the name.
    AlreadyExists,
    /// A rename to the current name.
    Unchanged,
    /// The name exceeds `MAX_NAME_LENGTH`.
    TooLong,
}

impl fmt::Display for NameRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            NameRejection::Empty => "name is empty",
            NameRejection::AlreadyExists => "name already exists",
            NameRejection::Unchanged => "new name equals the current name",
            NameRejection::TooLong => "name is too long",
        };
        f.write_str(reason)
    }
}

/// Errors that can occur in playpen.
///
/// - Mutation errors are non-fatal: the workspace is left unchanged
/// - Use `Result<T, PlaypenError>` for fallible operations
/// - The core never panics
#[derive(Debug, Error)]
pub enum PlaypenError {
    /// The proposed name is empty, taken, unchanged or too long.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: NameRejection },

    /// The name has no extension, or one outside the allow-list.
    #[error("Unsupported kind for '{0}' (supported extensions: .html, .css, .js, .ts, .py, .php)")]
    UnsupportedKind(String),

    /// A store-level rename targeted an existing key.
    #[error("Name collision: {0}")]
    NameCollision(String),

    /// The requested artifact does not exist.
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    /// A preview was requested for an artifact that is not markup.
    #[error("Not a markup artifact: {0}")]
    NotMarkup(String),

    /// An edit arrived while nothing is selected.
    #[error("No artifact is selected")]
    NoSelection,

    /// An editor setting is outside its accepted range.
    #[error("Invalid setting: {0}")]
    InvalidSettings(String),

    /// A persisted record could not be decoded.
    #[error("Persisted record is corrupt: {0}")]
    PersistenceCorrupt(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl PlaypenError {
    /// Shorthand for an `InvalidName` error.
    #[must_use]
    pub fn invalid_name(name: &str, reason: NameRejection) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
