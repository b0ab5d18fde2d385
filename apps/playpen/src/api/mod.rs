//! # Playpen HTTP API Module
//!
//! The UI action surface and the rendering collaborator, over axum.
//!
//! ## Endpoints
//!
//! - `GET  /health` - Health check
//! - `GET  /workspace` - Folders, artifacts and the active selection
//! - `GET  /artifacts/{name}` - One artifact with content
//! - `POST /artifacts` - Create an artifact
//! - `POST /artifacts/rename` - Rename an artifact
//! - `POST /artifacts/delete` - Delete an artifact (explicit `confirm`)
//! - `POST /folders` - Create an empty folder
//! - `POST /select` - Change the active selection
//! - `PUT  /content` - Replace the content of the active artifact
//! - `POST /run` - Recompose the preview
//! - `GET  /preview` - The composite document (sandboxed `text/html`)
//! - `GET  /settings` - Editor settings
//! - `GET  /themes` - Available editor themes
//! - `POST /export` - Export bundle (base64)
//! - `POST /import` - Replace the workspace from a bundle (base64)
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `PLAYPEN_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `PLAYPEN_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod types;

pub use auth::{get_api_key_from_env, keys_match};
pub use handlers::status_for;
pub use types::{
    ArtifactResponse, ArtifactSummary, ContentRequest, CreateArtifactRequest, DeleteRequest,
    ExportResponse, FolderJson, HealthResponse, ImportRequest, MutationResponse, NameRequest,
    RenameRequest, RunResponse, SettingsResponse, ThemeJson, ThemesResponse, WorkspaceResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post, put},
};
use playpen_core::{EditorSettings, PlaypenError, Session};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (2 MB).
const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// The session; the write lock serializes mutations.
    pub session: Arc<RwLock<Session>>,
    /// Static editor settings from the config file.
    pub settings: Arc<EditorSettings>,
}

impl AppState {
    /// Create app state with default editor settings.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self::with_settings(session, EditorSettings::default())
    }

    #[must_use]
    pub fn with_settings(session: Session, settings: EditorSettings) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            settings: Arc::new(settings),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from `PLAYPEN_CORS_ORIGINS`.
///
/// - `*`: allow all origins
/// - unset: localhost only
/// - otherwise: the comma-separated list
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("PLAYPEN_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (PLAYPEN_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(hv) => {
                        tracing::info!("CORS: Allowing origin: {}", origin);
                        Some(hv)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                        None
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in PLAYPEN_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                restricted_cors(allowed_origins)
            }
        }
        None => {
            tracing::info!("CORS: No PLAYPEN_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// A CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
    .collect();

    restricted_cors(origins)
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Authentication - validates API key (if configured)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible. \
             Set PLAYPEN_API_KEY to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/workspace", get(handlers::workspace_handler))
        .route("/artifacts", post(handlers::create_artifact_handler))
        .route("/artifacts/rename", post(handlers::rename_artifact_handler))
        .route("/artifacts/delete", post(handlers::delete_artifact_handler))
        .route("/artifacts/{name}", get(handlers::artifact_handler))
        .route("/folders", post(handlers::create_folder_handler))
        .route("/select", post(handlers::select_handler))
        .route("/content", put(handlers::content_handler))
        .route("/run", post(handlers::run_handler))
        .route("/preview", get(handlers::preview_handler))
        .route("/settings", get(handlers::settings_handler))
        .route("/themes", get(handlers::themes_handler))
        .route("/export", post(handlers::export_handler))
        .route("/import", post(handlers::import_handler));

    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Resolve when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Start the HTTP server.
pub async fn run_server(
    addr: &str,
    session: Session,
    settings: EditorSettings,
) -> Result<(), PlaypenError> {
    let state = AppState::with_settings(session, settings);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PlaypenError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Playpen HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PlaypenError::IoError(format!("Server error: {}", e)))
}
