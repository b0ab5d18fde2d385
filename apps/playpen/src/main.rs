//! # Playpen - Workspace Server
//!
//! The main binary for the playpen artifact workspace.
//!
//! This application provides:
//! - HTTP API server (axum-based) serving the workspace and live preview
//! - CLI interface for workspace operations
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                apps/playpen (THE BINARY)              │
//! │                                                       │
//! │   ┌─────────────┐    ┌─────────────┐   ┌──────────┐  │
//! │   │    CLI      │    │  HTTP API   │   │  Config  │  │
//! │   │   (clap)    │    │   (axum)    │   │  (toml)  │  │
//! │   └──────┬──────┘    └──────┬──────┘   └────┬─────┘  │
//! │          └──────────────────┼───────────────┘        │
//! │                             ▼                        │
//! │                     ┌──────────────┐                 │
//! │                     │ playpen-core │                 │
//! │                     │ (THE LOGIC)  │                 │
//! │                     └──────────────┘                 │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! playpen serve --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! playpen status
//! playpen new about.html --folder pages
//! playpen preview index.html --output preview.html
//! ```

use clap::Parser;
use playpen::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments first so --verbose can raise the default level.
    let cli = cli::Cli::parse();

    // PLAYPEN_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PLAYPEN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("playpen={level},playpen_core={level},tower_http=debug").into()
    });

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ┌─┐┬  ┌─┐┬ ┬┌─┐┌─┐┌┐┌
  ├─┘│  ├─┤└┬┘├─┘├┤ │││
  ┴  ┴─┘┴ ┴ ┴ ┴  └─┘┘└┘

  Workspace Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
