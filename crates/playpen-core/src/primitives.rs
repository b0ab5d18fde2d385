//! # Innate Primitives
//!
//! Hardcoded runtime constants for the playpen core.
//!
//! These are compiled into the binary and are immutable at runtime.
//!
//! ## Primitives
//!
//! 1. **Record keys**: the two named records in the durable store.
//! 2. **Splice markers**: where the compositor inserts style and script blocks.
//! 3. **Seed data**: the workspace used when nothing (valid) is persisted.
//! 4. **Bundle header**: magic bytes and version of the export format.

/// Durable record holding the Artifact Store.
pub const ARTIFACTS_RECORD: &str = "artifacts";

/// Durable record holding the Folder Index.
pub const FOLDERS_RECORD: &str = "folders";

/// Folder used when a create request names none.
pub const DEFAULT_FOLDER: &str = "src";

/// Artifact selected on session start when present.
pub const DEFAULT_ENTRY: &str = "index.html";

/// Separator between an artifact's stem and its extension.
pub const EXTENSION_SEPARATOR: char = '.';

/// Stylesheet blocks are spliced in front of the first occurrence.
pub const HEAD_CLOSE_MARKER: &str = "</head>";

/// Script blocks are spliced in front of the first occurrence.
pub const BODY_CLOSE_MARKER: &str = "</body>";

/// Maximum length for artifact and folder names, in bytes.
pub const MAX_NAME_LENGTH: usize = 255;

/// Seed artifacts as `(name, content)`, in store order.
pub const SEED_ARTIFACTS: [(&str, &str); 3] = [
    ("index.html", "<h1>Hello, World!</h1>"),
    ("styles.css", "body { font-family: Arial; }"),
    ("script.js", "console.log(\"Hello, World!\");"),
];

/// Magic bytes for the export bundle header.
///
/// - Bundle = Magic Bytes ("PLAY") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"PLAY";

/// Current bundle format version.
///
/// Increment this when making breaking changes to the bundle payload.
pub const FORMAT_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keys_are_distinct() {
        assert_ne!(ARTIFACTS_RECORD, FOLDERS_RECORD);
    }

    #[test]
    fn default_entry_is_seeded() {
        assert!(SEED_ARTIFACTS.iter().any(|(name, _)| *name == DEFAULT_ENTRY));
    }

    #[test]
    fn magic_bytes_correct() {
        assert_eq!(MAGIC_BYTES, b"PLAY");
    }
}
