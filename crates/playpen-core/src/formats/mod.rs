//! # Serialization Formats
//!
//! Pure transformations between workspace state and bytes. No I/O.
//!
//! - `records`: the two JSON records kept in the durable store
//! - `bundle`: the binary export format (header + postcard payload)

pub mod bundle;
pub mod records;

pub use bundle::{BundleHeader, MAX_BUNDLE_SIZE, workspace_from_bytes, workspace_to_bytes};
pub use records::{
    decode_artifacts, decode_folders, encode_artifacts, encode_folders,
};
