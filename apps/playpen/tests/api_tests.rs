//! Integration tests for the Playpen HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
// Allow holding MutexGuard across await in auth tests - tests are serialized
// intentionally to avoid env var conflicts
#![allow(clippy::unwrap_used, clippy::panic, clippy::await_holding_lock)]

use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use playpen::api::{
    AppState, ArtifactResponse, ExportResponse, HealthResponse, MutationResponse, RunResponse,
    WorkspaceResponse, create_router,
};
use playpen_core::{EditorSettings, Session, Theme};
use serde_json::json;
use std::sync::Mutex;

/// Mutex to serialize tests since auth tests modify env vars.
static AUTH_TEST_MUTEX: Mutex<()> = Mutex::new(());

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Guard wrapper that holds the mutex and ensures cleanup on drop.
struct TestGuard {
    _guard: std::sync::MutexGuard<'static, ()>,
}

impl Drop for TestGuard {
    fn drop(&mut self) {
        // SAFETY: Tests run sequentially under AUTH_TEST_MUTEX, so no concurrent env access.
        unsafe { std::env::remove_var("PLAYPEN_API_KEY") };
    }
}

/// Create a test server around `session`.
/// Returns a guard that must be kept alive during the test.
fn server_for(state: AppState) -> (TestServer, TestGuard) {
    let guard = AUTH_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    // SAFETY: Tests run sequentially under AUTH_TEST_MUTEX, so no concurrent env access.
    unsafe { std::env::remove_var("PLAYPEN_API_KEY") };
    let router = create_router(state);
    (
        TestServer::new(router).unwrap(),
        TestGuard { _guard: guard },
    )
}

/// Create a test server with a fresh in-memory seed session.
fn create_test_server() -> (TestServer, TestGuard) {
    server_for(AppState::new(Session::new()))
}

async fn workspace(server: &TestServer) -> WorkspaceResponse {
    server.get("/workspace").await.json()
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _guard) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// WORKSPACE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_workspace_seed() {
    let (server, _guard) = create_test_server();

    let ws = workspace(&server).await;

    assert_eq!(ws.active.as_deref(), Some("index.html"));
    assert_eq!(ws.folders.len(), 1);
    assert_eq!(ws.folders[0].name, "src");
    assert_eq!(
        ws.folders[0].members,
        vec!["index.html", "styles.css", "script.js"]
    );
    let languages: Vec<_> = ws.artifacts.iter().map(|a| a.language.as_str()).collect();
    assert_eq!(languages, vec!["html", "css", "javascript"]);
}

#[tokio::test]
async fn test_get_artifact() {
    let (server, _guard) = create_test_server();

    let response = server.get("/artifacts/index.html").await;

    response.assert_status_ok();
    let artifact: ArtifactResponse = response.json();
    assert_eq!(artifact.content, "<h1>Hello, World!</h1>");
    assert!(artifact.active);
}

#[tokio::test]
async fn test_get_missing_artifact_returns_404() {
    let (server, _guard) = create_test_server();

    let response = server.get("/artifacts/nope.js").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// STRUCTURAL MUTATION TESTS
// =============================================================================

#[tokio::test]
async fn test_create_artifact_in_folder() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/artifacts")
        .json(&json!({ "name": "app.ts", "folder": "lib" }))
        .await;

    response.assert_status_ok();
    let result: MutationResponse = response.json();
    assert!(result.success);
    assert!(result.applied);
    assert_eq!(result.active.as_deref(), Some("index.html"));

    let ws = workspace(&server).await;
    let lib = ws.folders.iter().find(|f| f.name == "lib").unwrap();
    assert_eq!(lib.members, vec!["app.ts"]);
    let created = ws.artifacts.iter().find(|a| a.name == "app.ts").unwrap();
    assert_eq!(created.language, "typescript");
    assert_eq!(created.size, 0);
}

#[tokio::test]
async fn test_create_artifact_rejections_return_400() {
    let (server, _guard) = create_test_server();

    for name in ["readme.md", "noextension", "index.html", ""] {
        let response = server.post("/artifacts").json(&json!({ "name": name })).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let result: MutationResponse = response.json();
        assert!(!result.success, "{name} should be rejected");
        assert!(result.error.is_some());
    }

    assert_eq!(workspace(&server).await.artifacts.len(), 3);
}

#[tokio::test]
async fn test_rename_artifact() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/artifacts/rename")
        .json(&json!({ "from": "styles.css", "to": "main.css" }))
        .await;
    response.assert_status_ok();

    server
        .get("/artifacts/styles.css")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let renamed: ArtifactResponse = server.get("/artifacts/main.css").await.json();
    assert_eq!(renamed.content, "body { font-family: Arial; }");

    let ws = workspace(&server).await;
    assert_eq!(
        ws.folders[0].members,
        vec!["index.html", "main.css", "script.js"]
    );
}

#[tokio::test]
async fn test_rename_missing_returns_404() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/artifacts/rename")
        .json(&json!({ "from": "ghost.js", "to": "spirit.js" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (server, _guard) = create_test_server();

    let declined = server
        .post("/artifacts/delete")
        .json(&json!({ "name": "script.js" }))
        .await;
    declined.assert_status_ok();
    let result: MutationResponse = declined.json();
    assert!(result.success);
    assert!(!result.applied);
    server.get("/artifacts/script.js").await.assert_status_ok();

    let confirmed = server
        .post("/artifacts/delete")
        .json(&json!({ "name": "script.js", "confirm": true }))
        .await;
    confirmed.assert_status_ok();
    let result: MutationResponse = confirmed.json();
    assert!(result.applied);
    server
        .get("/artifacts/script.js")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_active_moves_selection() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/artifacts/delete")
        .json(&json!({ "name": "index.html", "confirm": true }))
        .await;

    let result: MutationResponse = response.json();
    assert_eq!(result.active.as_deref(), Some("styles.css"));
}

#[tokio::test]
async fn test_create_folder() {
    let (server, _guard) = create_test_server();

    let first: MutationResponse = server
        .post("/folders")
        .json(&json!({ "name": "assets" }))
        .await
        .json();
    let again: MutationResponse = server
        .post("/folders")
        .json(&json!({ "name": "assets" }))
        .await
        .json();

    assert!(first.applied);
    assert!(!again.applied);
    let ws = workspace(&server).await;
    assert!(ws.folders.iter().any(|f| f.name == "assets" && f.members.is_empty()));

    server
        .post("/folders")
        .json(&json!({ "name": "src" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// SELECTION AND CONTENT TESTS
// =============================================================================

#[tokio::test]
async fn test_select_missing_returns_404() {
    let (server, _guard) = create_test_server();

    server
        .post("/select")
        .json(&json!({ "name": "ghost.html" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    assert_eq!(workspace(&server).await.active.as_deref(), Some("index.html"));
}

#[tokio::test]
async fn test_edit_rerenders_preview() {
    let (server, _guard) = create_test_server();

    server
        .put("/content")
        .json(&json!({ "content": "<head></head><body></body>" }))
        .await
        .assert_status_ok();

    let response = server.get("/preview").await;
    response.assert_status_ok();
    assert_eq!(
        response.text(),
        "<head><style>body { font-family: Arial; }</style></head>\
         <body><script>console.log(\"Hello, World!\");</script></body>"
    );
}

#[tokio::test]
async fn test_edit_stylesheet_keeps_last_preview() {
    let (server, _guard) = create_test_server();

    server
        .post("/select")
        .json(&json!({ "name": "styles.css" }))
        .await
        .assert_status_ok();
    server
        .put("/content")
        .json(&json!({ "content": "h1 { color: red; }" }))
        .await
        .assert_status_ok();

    let response = server.get("/preview").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "<h1>Hello, World!</h1>");
}

#[tokio::test]
async fn test_edit_without_selection_returns_409() {
    let (server, _guard) = create_test_server();

    for name in ["index.html", "styles.css", "script.js"] {
        server
            .post("/artifacts/delete")
            .json(&json!({ "name": name, "confirm": true }))
            .await
            .assert_status_ok();
    }

    server
        .put("/content")
        .json(&json!({ "content": "x" }))
        .await
        .assert_status(StatusCode::CONFLICT);
    server
        .get("/preview")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

// =============================================================================
// PREVIEW TESTS
// =============================================================================

#[tokio::test]
async fn test_preview_is_sandboxed_html() {
    let (server, _guard) = create_test_server();

    let response = server.get("/preview").await;

    response.assert_status_ok();
    let headers = response.headers();
    assert_eq!(
        headers.get("content-security-policy").unwrap(),
        "sandbox allow-scripts"
    );
    assert!(
        headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
}

#[tokio::test]
async fn test_run_reports_render() {
    let (server, _guard) = create_test_server();

    let response = server.post("/run").await;

    response.assert_status_ok();
    let run: RunResponse = response.json();
    assert_eq!(run.state, "render");
    assert_eq!(run.document.as_deref(), Some("<h1>Hello, World!</h1>"));
}

// =============================================================================
// SETTINGS TESTS
// =============================================================================

#[tokio::test]
async fn test_settings_defaults() {
    let (server, _guard) = create_test_server();

    let response = server.get("/settings").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["settings"]["theme"], "vs-dark");
    assert_eq!(body["options"]["fontSize"], 14);
    assert_eq!(body["options"]["wordWrap"], "on");
    assert_eq!(body["options"]["minimap"]["enabled"], true);
}

#[tokio::test]
async fn test_settings_from_state() {
    let settings = EditorSettings {
        theme: Theme::Dracula,
        font_size: 18,
        ..EditorSettings::default()
    };
    let (server, _guard) = server_for(AppState::with_settings(Session::new(), settings));

    let body: serde_json::Value = server.get("/settings").await.json();

    assert_eq!(body["options"]["theme"], "dracula");
    assert_eq!(body["options"]["fontSize"], 18);
}

#[tokio::test]
async fn test_themes_list() {
    let (server, _guard) = create_test_server();

    let body: serde_json::Value = server.get("/themes").await.json();
    let themes = body["themes"].as_array().unwrap();

    assert_eq!(themes.len(), Theme::ALL.len());
    let vs = themes.iter().find(|t| t["id"] == "vs").unwrap();
    assert_eq!(vs["builtin"], true);
    assert!(vs["palette"].is_null());
    let nord = themes.iter().find(|t| t["id"] == "nord").unwrap();
    assert_eq!(nord["builtin"], false);
    assert_eq!(nord["palette"]["base"], "vs-dark");
}

// =============================================================================
// EXPORT / IMPORT TESTS
// =============================================================================

#[tokio::test]
async fn test_export_then_import() {
    let (server, _guard) = create_test_server();

    let export: ExportResponse = server.post("/export").await.json();
    assert!(export.success);
    assert!(export.size > 0);
    let data = export.data.unwrap();

    server
        .post("/artifacts/delete")
        .json(&json!({ "name": "styles.css", "confirm": true }))
        .await
        .assert_status_ok();

    let response = server.post("/import").json(&json!({ "data": data })).await;
    response.assert_status_ok();
    let result: MutationResponse = response.json();
    assert_eq!(result.active.as_deref(), Some("index.html"));

    server.get("/artifacts/styles.css").await.assert_status_ok();
}

#[tokio::test]
async fn test_import_rejects_bad_payloads() {
    let (server, _guard) = create_test_server();

    server
        .post("/import")
        .json(&json!({ "data": "not base64!" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Valid base64 of "garbage bytes".
    server
        .post("/import")
        .json(&json!({ "data": "Z2FyYmFnZSBieXRlcw==" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(workspace(&server).await.artifacts.len(), 3);
}

// =============================================================================
// AUTHENTICATION MIDDLEWARE TESTS
// =============================================================================

/// Create a test server with authentication enabled.
/// Must be called while holding AUTH_TEST_MUTEX.
fn create_auth_test_server(api_key: &str) -> TestServer {
    // SAFETY: Tests run sequentially under AUTH_TEST_MUTEX, so no concurrent env access.
    unsafe { std::env::set_var("PLAYPEN_API_KEY", api_key) };
    let state = AppState::new(Session::new());
    TestServer::new(create_router(state)).unwrap()
}

/// Clean up auth env var after test.
fn cleanup_auth_env() {
    // SAFETY: Tests run sequentially under AUTH_TEST_MUTEX, so no concurrent env access.
    unsafe { std::env::remove_var("PLAYPEN_API_KEY") };
}

#[tokio::test]
async fn test_auth_valid_bearer_token() {
    let _guard = AUTH_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let api_key = "test-secret-key-12345";
    let server = create_auth_test_server(api_key);

    let response = server
        .get("/workspace")
        .add_header(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", api_key)
                .parse::<HeaderValue>()
                .unwrap(),
        )
        .await;

    cleanup_auth_env();

    response.assert_status_ok();
}

#[tokio::test]
async fn test_auth_valid_raw_token() {
    let _guard = AUTH_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let api_key = "test-raw-key-67890";
    let server = create_auth_test_server(api_key);

    let response = server
        .get("/workspace")
        .add_header(
            axum::http::header::AUTHORIZATION,
            api_key.parse::<HeaderValue>().unwrap(),
        )
        .await;

    cleanup_auth_env();

    response.assert_status_ok();
}

#[tokio::test]
async fn test_auth_invalid_token_rejected() {
    let _guard = AUTH_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let server = create_auth_test_server("correct-key");

    let response = server
        .put("/content")
        .json(&json!({ "content": "pwned" }))
        .add_header(
            axum::http::header::AUTHORIZATION,
            "Bearer wrong-key".parse::<HeaderValue>().unwrap(),
        )
        .await;

    cleanup_auth_env();

    assert_eq!(
        response.status_code().as_u16(),
        401,
        "Invalid token should return 401 Unauthorized"
    );
}

#[tokio::test]
async fn test_auth_missing_header_rejected() {
    let _guard = AUTH_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let server = create_auth_test_server("required-key");

    let response = server.get("/preview").await;

    cleanup_auth_env();

    assert_eq!(response.status_code().as_u16(), 401);
}

#[tokio::test]
async fn test_auth_health_endpoint_bypasses_auth() {
    let _guard = AUTH_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let server = create_auth_test_server("secret-key-for-bypass-test");

    let response = server.get("/health").await;

    cleanup_auth_env();

    response.assert_status_ok();
}
