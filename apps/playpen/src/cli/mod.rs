//! # Playpen CLI Module
//!
//! This module implements the CLI interface for playpen.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `status` - Show the folder tree
//! - `new` / `mkdir` / `rename` / `rm` - Structural edits
//! - `show` / `write` - Read or replace artifact content
//! - `preview` - Print or save the composite document
//! - `export` / `import` - Workspace bundles
//! - `init` - Reset to the seed workspace
//! - `themes` - List editor themes

mod commands;

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use playpen_core::PlaypenError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Playpen - markup/stylesheet/script workspace with live preview
#[derive(Parser, Debug)]
#[command(name = "playpen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the workspace database
    #[arg(short = 'D', long, global = true, default_value = "playpen.db")]
    pub database: PathBuf,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "playpen.toml")]
    pub config: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show folders, artifacts and the active selection
    Status,

    /// Create an empty artifact
    New {
        /// Artifact name, including extension
        name: String,

        /// Folder to file it under
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Create an empty folder
    Mkdir {
        name: String,
    },

    /// Rename an artifact
    Rename {
        old: String,
        new: String,
    },

    /// Delete an artifact
    Rm {
        name: String,

        /// Confirm the deletion; without it nothing is deleted
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the content of an artifact
    Show {
        name: String,
    },

    /// Replace the content of an artifact from a file
    Write {
        name: String,

        /// File holding the new content
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print or save the composite preview document
    Preview {
        /// Markup artifact to compose (default: the active one)
        name: Option<String>,

        /// Write the document to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the workspace as a bundle
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Replace the workspace with a bundle
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Initialize the database with the seed workspace
    Init {
        /// Reset even if the database exists
        #[arg(short, long)]
        force: bool,
    },

    /// List editor themes
    Themes,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), PlaypenError> {
    let db = cli.database.as_path();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            let mut config = AppConfig::load(&cli.config)?.with_env_overrides();
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_serve(db, config).await
        }
        Some(Commands::Status) | None => cmd_status(db, json_mode),
        Some(Commands::New { name, folder }) => cmd_new(db, json_mode, &name, folder.as_deref()),
        Some(Commands::Mkdir { name }) => cmd_mkdir(db, json_mode, &name),
        Some(Commands::Rename { old, new }) => cmd_rename(db, json_mode, &old, &new),
        Some(Commands::Rm { name, yes }) => cmd_rm(db, json_mode, &name, yes),
        Some(Commands::Show { name }) => cmd_show(db, json_mode, &name),
        Some(Commands::Write { name, file }) => cmd_write(db, json_mode, &name, &file),
        Some(Commands::Preview { name, output }) => {
            cmd_preview(db, name.as_deref(), output.as_deref())
        }
        Some(Commands::Export { output }) => cmd_export(db, &output),
        Some(Commands::Import { input }) => cmd_import(db, &input),
        Some(Commands::Init { force }) => cmd_init(db, force),
        Some(Commands::Themes) => {
            let config = AppConfig::load(&cli.config)?;
            cmd_themes(json_mode, &config)
        }
    }
}
