//! # Naming & Kind Resolver
//!
//! The sole gate for what names are acceptable as artifact names.
//!
//! The kind is a pure function of the extension: the text after the last
//! separator, lower-cased, looked up in a fixed table. Anything else,
//! including a name without a separator, is rejected.

use crate::primitives::{EXTENSION_SEPARATOR, MAX_NAME_LENGTH};
use crate::{Kind, NameRejection, PlaypenError};

/// Resolve the content kind of an artifact name.
///
/// `Foo.CSS` and `foo.css` both resolve to [`Kind::Stylesheet`].
pub fn resolve_kind(name: &str) -> Result<Kind, PlaypenError> {
    let (_, extension) = name
        .rsplit_once(EXTENSION_SEPARATOR)
        .ok_or_else(|| PlaypenError::UnsupportedKind(name.to_string()))?;

    let extension = extension.to_ascii_lowercase();
    Kind::ALL
        .into_iter()
        .find(|kind| kind.extension() == extension)
        .ok_or_else(|| PlaypenError::UnsupportedKind(name.to_string()))
}

/// Check the shape of a proposed name (artifact or folder).
///
/// Does not look at existing names; collisions are the caller's concern.
pub fn validate_name(name: &str) -> Result<(), PlaypenError> {
    if name.is_empty() {
        return Err(PlaypenError::invalid_name(name, NameRejection::Empty));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(PlaypenError::invalid_name(name, NameRejection::TooLong));
    }
    Ok(())
}

/// Check whether a name resolves to a supported kind.
#[must_use]
pub fn is_supported(name: &str) -> bool {
    resolve_kind(name).is_ok()
}

// =============================================================================
// TESTS
// =============================================================================
