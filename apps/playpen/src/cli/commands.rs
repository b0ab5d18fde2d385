//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Every command opens the redb-backed session, runs one operation and
//! exits; the session writes through on every applied mutation.

use crate::api;
use crate::config::AppConfig;
use playpen_core::{MAX_BUNDLE_SIZE, Outcome, PlaypenError, Session, Theme};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a file passed to `write` (10 MB).
const MAX_CONTENT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), PlaypenError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| PlaypenError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(PlaypenError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path to an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, PlaypenError> {
    let canonical = path.canonicalize().map_err(|e| {
        PlaypenError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(PlaypenError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path whose parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, PlaypenError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        PlaypenError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(PlaypenError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| PlaypenError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

/// The line to print for a mutation outcome; nothing for an empty message.
fn outcome_message<'a>(outcome: Outcome, done: &'a str, unchanged: &'a str) -> Option<&'a str> {
    let message = if outcome.is_applied() { done } else { unchanged };
    Some(message).filter(|m| !m.is_empty())
}

/// Report a mutation outcome.
fn report(json_mode: bool, session: &Session, outcome: Outcome, done: &str, unchanged: &str) {
    if json_mode {
        print_json(&serde_json::json!({
            "applied": outcome.is_applied(),
            "active": session.workspace().active_name(),
        }));
    } else if let Some(message) = outcome_message(outcome, done, unchanged) {
        println!("{}", message);
    }
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(db_path: &Path, config: AppConfig) -> Result<(), PlaypenError> {
    let session = open_session(db_path)?;

    println!("Playpen Workspace Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.server.host);
    println!("  Port:     {}", config.server.port);
    println!("  Database: {:?}", db_path);
    println!("  Theme:    {}", config.editor.theme);
    println!();
    println!("Endpoints:");
    println!("  GET  /workspace         - Folder tree and selection");
    println!("  POST /artifacts         - Create an artifact");
    println!("  POST /artifacts/rename  - Rename an artifact");
    println!("  POST /artifacts/delete  - Delete an artifact");
    println!("  POST /select            - Select an artifact");
    println!("  PUT  /content           - Edit the active artifact");
    println!("  GET  /preview           - Composite preview");
    println!("  GET  /health            - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&config.server.addr(), session, config.editor).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show the folder tree.
pub fn cmd_status(db_path: &Path, json_mode: bool) -> Result<(), PlaypenError> {
    let session = open_session(db_path)?;
    let ws = session.workspace();
    let integrity = session.integrity_report();

    if json_mode {
        let folders: serde_json::Map<String, serde_json::Value> = ws
            .folders()
            .iter()
            .map(|(folder, members)| (folder.to_string(), serde_json::json!(members)))
            .collect();
        print_json(&serde_json::json!({
            "database": db_path.to_string_lossy(),
            "artifact_count": ws.artifacts().len(),
            "folder_count": ws.folders().len(),
            "active": ws.active_name(),
            "folders": folders,
            "integrity": integrity,
        }));
        return Ok(());
    }

    println!("Playpen Workspace");
    println!("=================");
    println!("Database: {:?}", db_path);
    println!();

    for (folder, members) in ws.folders().iter() {
        println!("{}/", folder);
        for member in members {
            let marker = if ws.active_name() == Some(member.as_str()) {
                "*"
            } else {
                " "
            };
            let language = ws
                .artifacts()
                .get(member)
                .map_or("missing", |a| a.kind.language_id());
            println!("  {} {:<32} {}", marker, member, language);
        }
    }

    println!();
    println!("Artifacts: {}", ws.artifacts().len());
    println!("Folders:   {}", ws.folders().len());
    println!("Active:    {}", ws.active_name().unwrap_or("(none)"));

    if !integrity.is_clean() {
        println!();
        println!("Integrity issues:");
        for (folder, member) in &integrity.dangling_members {
            println!("  {}/{} is listed but missing", folder, member);
        }
        for name in &integrity.unfiled_artifacts {
            println!("  {} is in no folder", name);
        }
    }

    if !integrity.empty_folders.is_empty() {
        println!();
        println!("Empty folders: {}", integrity.empty_folders.join(", "));
    }

    Ok(())
}

// =============================================================================
// STRUCTURAL COMMANDS
// =============================================================================

/// Create an empty artifact.
pub fn cmd_new(
    db_path: &Path,
    json_mode: bool,
    name: &str,
    folder: Option<&str>,
) -> Result<(), PlaypenError> {
    let mut session = open_session(db_path)?;
    let outcome = session.create_artifact(name, folder)?;
    report(json_mode, &session, outcome, &format!("Created {}", name), "");
    Ok(())
}

/// Create an empty folder.
pub fn cmd_mkdir(db_path: &Path, json_mode: bool, name: &str) -> Result<(), PlaypenError> {
    let mut session = open_session(db_path)?;
    let outcome = session.create_folder(name)?;
    // Placeholders are not persisted, so this only matters to a running server.
    report(
        json_mode,
        &session,
        outcome,
        &format!("Created folder {} (kept until its first artifact)", name),
        &format!("Folder {} already exists", name),
    );
    Ok(())
}

/// Rename an artifact.
pub fn cmd_rename(db_path: &Path, json_mode: bool, old: &str, new: &str) -> Result<(), PlaypenError> {
    let mut session = open_session(db_path)?;
    let outcome = session.rename_artifact(old, new)?;
    report(
        json_mode,
        &session,
        outcome,
        &format!("Renamed {} -> {}", old, new),
        "",
    );
    Ok(())
}

/// Delete an artifact; `--yes` is the confirmation.
pub fn cmd_rm(db_path: &Path, json_mode: bool, name: &str, yes: bool) -> Result<(), PlaypenError> {
    let mut session = open_session(db_path)?;
    let outcome = session.delete_artifact(name, yes.into())?;
    report(
        json_mode,
        &session,
        outcome,
        &format!("Deleted {}", name),
        &format!("Not deleted: pass --yes to confirm deleting {}", name),
    );
    Ok(())
}

// =============================================================================
// CONTENT COMMANDS
// =============================================================================

/// Print the content of an artifact.
pub fn cmd_show(db_path: &Path, json_mode: bool, name: &str) -> Result<(), PlaypenError> {
    let session = open_session(db_path)?;
    let artifact = session
        .artifact(name)
        .ok_or_else(|| PlaypenError::ArtifactNotFound(name.to_string()))?;

    if json_mode {
        print_json(&serde_json::json!({
            "name": artifact.name,
            "language": artifact.kind.language_id(),
            "content": artifact.content,
        }));
    } else {
        print!("{}", artifact.content);
    }
    Ok(())
}

/// Replace the content of an artifact: select it, then edit.
pub fn cmd_write(
    db_path: &Path,
    json_mode: bool,
    name: &str,
    file: &Path,
) -> Result<(), PlaypenError> {
    let validated_path = validate_file_path(file)?;
    validate_file_size(&validated_path, MAX_CONTENT_FILE_SIZE)?;
    let content = std::fs::read_to_string(&validated_path)
        .map_err(|e| PlaypenError::IoError(format!("Read file: {}", e)))?;

    let mut session = open_session(db_path)?;
    session.select(name)?;
    let outcome = session.edit(&content)?;
    report(
        json_mode,
        &session,
        outcome,
        &format!("Wrote {} bytes to {}", content.len(), name),
        "",
    );
    Ok(())
}

/// Print or save the composite preview.
pub fn cmd_preview(
    db_path: &Path,
    name: Option<&str>,
    output: Option<&Path>,
) -> Result<(), PlaypenError> {
    let session = open_session(db_path)?;

    let document = match name {
        Some(name) => session.preview_of(name)?,
        None => session
            .current_preview()
            .document()
            .map(String::from)
            .ok_or_else(|| match session.active() {
                Some(active) => PlaypenError::NotMarkup(active.name.clone()),
                None => PlaypenError::NoSelection,
            })?,
    };

    match output {
        Some(path) => {
            let validated = validate_output_path(path)?;
            std::fs::write(&validated, &document)
                .map_err(|e| PlaypenError::IoError(format!("Write file: {}", e)))?;
            println!("Wrote preview ({} bytes) to {:?}", document.len(), validated);
        }
        None => println!("{}", document),
    }
    Ok(())
}

// =============================================================================
// EXPORT / IMPORT
// =============================================================================

/// Export the workspace bundle.
pub fn cmd_export(db_path: &Path, output: &Path) -> Result<(), PlaypenError> {
    let validated_output = validate_output_path(output)?;
    let session = open_session(db_path)?;

    let data = session.export_bundle()?;
    std::fs::write(&validated_output, &data)
        .map_err(|e| PlaypenError::IoError(format!("Write file: {}", e)))?;

    println!("Exported {} bytes to {:?}", data.len(), validated_output);
    Ok(())
}

/// Replace the workspace with a bundle.
pub fn cmd_import(db_path: &Path, input: &Path) -> Result<(), PlaypenError> {
    let validated_path = validate_file_path(input)?;
    validate_file_size(&validated_path, MAX_BUNDLE_SIZE as u64)?;

    let data = std::fs::read(&validated_path)
        .map_err(|e| PlaypenError::IoError(format!("Read file: {}", e)))?;

    let mut session = open_session(db_path)?;
    session.import_bundle(&data)?;

    println!(
        "Imported workspace: {} artifacts, {} folders",
        session.workspace().artifacts().len(),
        session.workspace().folders().len()
    );
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write the seed workspace to a new (or, with `--force`, existing) database.
pub fn cmd_init(db_path: &Path, force: bool) -> Result<(), PlaypenError> {
    if db_path.exists() && !force {
        return Err(PlaypenError::IoError(
            "Database already exists. Use --force to reset it.".to_string(),
        ));
    }

    let mut session = open_session(db_path)?;
    session.reset();
    session.save()?;
    session.compact()?;
    println!("Initialized workspace at {:?}", db_path);
    Ok(())
}

// =============================================================================
// THEMES COMMAND
// =============================================================================

/// List editor themes, marking the configured one.
pub fn cmd_themes(json_mode: bool, config: &AppConfig) -> Result<(), PlaypenError> {
    if json_mode {
        let themes: Vec<api::ThemeJson> = Theme::ALL.into_iter().map(api::ThemeJson::from).collect();
        print_json(&serde_json::json!({
            "configured": config.editor.theme,
            "themes": themes,
        }));
        return Ok(());
    }

    for theme in Theme::ALL {
        let marker = if theme == config.editor.theme { "*" } else { " " };
        match theme.palette() {
            Some(palette) => println!(
                "{} {:<16} {} on {} (base {})",
                marker, theme, palette.foreground, palette.background, palette.base
            ),
            None => println!("{} {:<16} built-in", marker, theme),
        }
    }
    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Open the redb-backed session at `db_path`.
pub fn open_session(db_path: &Path) -> Result<Session, PlaypenError> {
    Session::with_redb(db_path)
}

// =============================================================================
// TESTS
// =============================================================================
