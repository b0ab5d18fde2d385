//! # Configuration
//!
//! `playpen.toml` plus environment overrides.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [editor]
//! theme = "dracula"
//! font_size = 16
//! ```
//!
//! A missing file means defaults. A file that exists but does not parse, or
//! carries out-of-range editor settings, is an error.
//!
//! ## Environment
//!
//! - `PLAYPEN_HOST`: overrides `server.host`
//! - `PLAYPEN_PORT`: overrides `server.port`

use playpen_core::{EditorSettings, PlaypenError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for binding.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub editor: EditorSettings,
}

impl AppConfig {
    /// Parse configuration text and validate the editor section.
    pub fn parse(text: &str) -> Result<Self, PlaypenError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| PlaypenError::SerializationError(format!("Invalid config: {}", e)))?;
        config.editor.validate()?;
        Ok(config)
    }

    /// Load the configuration file, or defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, PlaypenError> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| PlaypenError::IoError(format!("Read config {:?}: {}", path, e)))?;
        let config = Self::parse(&text)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply `PLAYPEN_HOST` / `PLAYPEN_PORT`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(host) = std::env::var("PLAYPEN_HOST").ok().filter(|h| !h.is_empty()) {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PLAYPEN_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!("Ignoring PLAYPEN_PORT '{}': {}", port, e),
            }
        }
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use playpen_core::Theme;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = AppConfig::load(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config = AppConfig::parse(
            r#"
[server]
port = 9000

[editor]
theme = "nord"
minimap = false
"#,
        )
        .expect("parse");

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.editor.theme, Theme::Nord);
        assert!(!config.editor.minimap);
        assert_eq!(config.editor.font_size, 14);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("playpen.toml");
        std::fs::write(&path, "[server\nport = ").expect("write");

        assert!(matches!(
            AppConfig::load(&path),
            Err(PlaypenError::SerializationError(_))
        ));
    }

    #[test]
    fn unknown_theme_is_an_error() {
        assert!(AppConfig::parse("[editor]\ntheme = \"neon\"\n").is_err());
    }

    #[test]
    fn out_of_range_font_is_an_error() {
        assert!(matches!(
            AppConfig::parse("[editor]\nfont_size = 99\n"),
            Err(PlaypenError::InvalidSettings(_))
        ));
    }
}
