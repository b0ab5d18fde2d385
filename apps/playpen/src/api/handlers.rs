//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Mutating handlers take the session write lock for the whole operation,
//! which keeps mutations strictly one at a time.

use super::{
    AppState,
    types::{
        ArtifactResponse, ContentRequest, CreateArtifactRequest, DeleteRequest, ExportResponse,
        HealthResponse, ImportRequest, MutationResponse, NameRequest, RenameRequest,
        RunResponse, SettingsResponse, ThemeJson, ThemesResponse, WorkspaceResponse,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use base64::Engine;
use playpen_core::{
    Confirmation, Outcome, PlaypenError, PreviewUpdate, Session, Theme, formats::MAX_BUNDLE_SIZE,
};

/// Sandbox applied to every preview document.
const PREVIEW_CSP: &str = "sandbox allow-scripts";

/// Map a core error onto an HTTP status.
#[must_use]
pub fn status_for(error: &PlaypenError) -> StatusCode {
    match error {
        PlaypenError::InvalidName { .. }
        | PlaypenError::UnsupportedKind(_)
        | PlaypenError::NameCollision(_)
        | PlaypenError::NotMarkup(_)
        | PlaypenError::InvalidSettings(_)
        | PlaypenError::SerializationError(_) => StatusCode::BAD_REQUEST,
        PlaypenError::ArtifactNotFound(_) => StatusCode::NOT_FOUND,
        PlaypenError::NoSelection => StatusCode::CONFLICT,
        PlaypenError::PersistenceCorrupt(_) | PlaypenError::IoError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn mutation_reply(
    result: Result<Outcome, PlaypenError>,
    session: &Session,
) -> (StatusCode, Json<MutationResponse>) {
    match result {
        Ok(outcome) => (
            StatusCode::OK,
            Json(MutationResponse::success(outcome, session)),
        ),
        Err(e) => {
            tracing::debug!("Mutation rejected: {}", e);
            (status_for(&e), Json(MutationResponse::error(e.to_string())))
        }
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// READ HANDLERS
// =============================================================================

/// Explorer view: folders, artifacts and the active selection.
pub async fn workspace_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    (StatusCode::OK, Json(WorkspaceResponse::from_session(&session)))
}

/// One artifact with content.
pub async fn artifact_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    let session = state.session.read().await;
    match session.artifact(&name) {
        Some(artifact) => {
            let active = session.workspace().active_name() == Some(name.as_str());
            (StatusCode::OK, Json(ArtifactResponse::new(artifact, active))).into_response()
        }
        None => {
            let e = PlaypenError::ArtifactNotFound(name);
            (status_for(&e), Json(MutationResponse::error(e.to_string()))).into_response()
        }
    }
}

// =============================================================================
// MUTATION HANDLERS
// =============================================================================

pub async fn create_artifact_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateArtifactRequest>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let result = session.create_artifact(&request.name, request.folder.as_deref());
    mutation_reply(result, &session)
}

pub async fn rename_artifact_handler(
    State(state): State<AppState>,
    Json(request): Json<RenameRequest>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let result = session.rename_artifact(&request.from, &request.to);
    mutation_reply(result, &session)
}

/// Delete an artifact; `confirm` carries the user's answer to the prompt.
pub async fn delete_artifact_handler(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let result = session.delete_artifact(&request.name, Confirmation::from(request.confirm));
    mutation_reply(result, &session)
}

pub async fn create_folder_handler(
    State(state): State<AppState>,
    Json(request): Json<NameRequest>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let result = session.create_folder(&request.name);
    mutation_reply(result, &session)
}

pub async fn select_handler(
    State(state): State<AppState>,
    Json(request): Json<NameRequest>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let result = session.select(&request.name);
    mutation_reply(result, &session)
}

/// Content change from the editor widget.
pub async fn content_handler(
    State(state): State<AppState>,
    Json(request): Json<ContentRequest>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let result = session.edit(&request.content);
    mutation_reply(result, &session)
}

// =============================================================================
// PREVIEW HANDLERS
// =============================================================================

/// The Run button: recompose from the current snapshot.
pub async fn run_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let (label, document) = match session.run() {
        PreviewUpdate::Render(doc) => ("render", Some(doc.clone())),
        PreviewUpdate::Clear => ("clear", None),
        PreviewUpdate::Idle => ("idle", None),
    };
    Json(RunResponse {
        state: label.to_string(),
        document,
    })
}

/// The composite document, sandboxed. 204 when there is nothing to show.
pub async fn preview_handler(State(state): State<AppState>) -> Response {
    let session = state.session.read().await;
    match session.current_preview().document() {
        Some(document) => (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8"),
                (header::CONTENT_SECURITY_POLICY, PREVIEW_CSP),
            ],
            document.to_string(),
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

// =============================================================================
// SETTINGS HANDLERS
// =============================================================================

pub async fn settings_handler(State(state): State<AppState>) -> impl IntoResponse {
    let settings = state.settings.as_ref().clone();
    let options = settings.editor_options();
    Json(SettingsResponse { settings, options })
}

pub async fn themes_handler() -> impl IntoResponse {
    Json(ThemesResponse {
        themes: Theme::ALL.into_iter().map(ThemeJson::from).collect(),
    })
}

// =============================================================================
// EXPORT / IMPORT HANDLERS
// =============================================================================

/// Export the workspace as a base64-encoded bundle.
pub async fn export_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    match session.export_bundle() {
        Ok(bytes) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
            (
                StatusCode::OK,
                Json(ExportResponse::success(encoded, bytes.len())),
            )
        }
        Err(e) => (
            status_for(&e),
            Json(ExportResponse::error(format!("Export failed: {}", e))),
        ),
    }
}

/// Replace the workspace with a base64-encoded bundle.
pub async fn import_handler(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> impl IntoResponse {
    // base64 inflates by 4/3; reject before decoding anything larger.
    if request.data.len() / 4 * 3 > MAX_BUNDLE_SIZE {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(MutationResponse::error("Bundle too large")),
        );
    }

    let bytes = match base64::engine::general_purpose::STANDARD.decode(request.data.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(MutationResponse::error(format!("Invalid base64: {}", e))),
            );
        }
    };

    let mut session = state.session.write().await;
    match session.import_bundle(&bytes) {
        Ok(()) => (
            StatusCode::OK,
            Json(MutationResponse::success(
                Outcome::Applied {
                    selection_changed: true,
                },
                &session,
            )),
        ),
        Err(e) => (status_for(&e), Json(MutationResponse::error(e.to_string()))),
    }
}
