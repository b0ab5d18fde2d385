//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use playpen_core::{
    Artifact, EditorOptions, EditorSettings, Outcome, Session, Theme, ThemePalette,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// WORKSPACE VIEW
// =============================================================================

/// One folder of the explorer tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderJson {
    pub name: String,
    pub members: Vec<String>,
}

/// An artifact without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub name: String,
    pub language: String,
    pub size: usize,
}

/// The explorer view of the workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceResponse {
    pub active: Option<String>,
    pub folders: Vec<FolderJson>,
    pub artifacts: Vec<ArtifactSummary>,
}

impl WorkspaceResponse {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let ws = session.workspace();
        Self {
            active: ws.active_name().map(String::from),
            folders: ws
                .folders()
                .iter()
                .map(|(name, members)| FolderJson {
                    name: name.to_string(),
                    members: members.to_vec(),
                })
                .collect(),
            artifacts: ws
                .artifacts()
                .iter()
                .map(|a| ArtifactSummary {
                    name: a.name.clone(),
                    language: a.kind.language_id().to_string(),
                    size: a.content.len(),
                })
                .collect(),
        }
    }
}

/// A single artifact with its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactResponse {
    pub name: String,
    pub language: String,
    pub content: String,
    pub active: bool,
}

impl ArtifactResponse {
    #[must_use]
    pub fn new(artifact: &Artifact, active: bool) -> Self {
        Self {
            name: artifact.name.clone(),
            language: artifact.kind.language_id().to_string(),
            content: artifact.content.clone(),
            active,
        }
    }
}

// =============================================================================
// MUTATION REQUESTS
// =============================================================================

/// Create an artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtifactRequest {
    pub name: String,
    /// Folder to file the artifact under; the default folder when absent.
    #[serde(default)]
    pub folder: Option<String>,
}

/// Rename an artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameRequest {
    pub from: String,
    pub to: String,
}

/// Delete an artifact. Without `confirm: true` nothing happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub name: String,
    #[serde(default)]
    pub confirm: bool,
}

/// Create a folder or select an artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

/// Replace the content of the active artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    pub content: String,
}

// =============================================================================
// MUTATION RESPONSE
// =============================================================================

/// Result of any mutating request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    /// False when the request was accepted but changed nothing.
    pub applied: bool,
    pub active: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationResponse {
    #[must_use]
    pub fn success(outcome: Outcome, session: &Session) -> Self {
        Self {
            success: true,
            applied: outcome.is_applied(),
            active: session.workspace().active_name().map(String::from),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            applied: false,
            active: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// PREVIEW
// =============================================================================

/// Result of `POST /run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    /// `render`, `clear` or `idle`.
    pub state: String,
    pub document: Option<String>,
}

// =============================================================================
// SETTINGS / THEMES
// =============================================================================

/// Editor settings plus the derived widget options.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub settings: EditorSettings,
    pub options: EditorOptions,
}

/// One selectable theme.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeJson {
    pub id: &'static str,
    pub builtin: bool,
    pub palette: Option<&'static ThemePalette>,
}

impl From<Theme> for ThemeJson {
    fn from(theme: Theme) -> Self {
        Self {
            id: theme.id(),
            builtin: theme.is_builtin(),
            palette: theme.palette(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemesResponse {
    pub themes: Vec<ThemeJson>,
}

// =============================================================================
// EXPORT / IMPORT
// =============================================================================

/// Export response: the bundle, base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportResponse {
    #[must_use]
    pub fn success(data: String, size: usize) -> Self {
        Self {
            success: true,
            data: Some(data),
            size,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            size: 0,
            error: Some(msg.into()),
        }
    }
}

/// Import request: a base64-encoded bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    pub data: String,
}
