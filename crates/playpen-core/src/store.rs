//! # Artifact Store
//!
//! Owns the mapping from artifact name to content and kind.
//!
//! Lookups go through a `BTreeMap`; iteration follows insertion order,
//! which is tracked separately because the compositor and the persisted
//! record both depend on it. A rename creates a new entry, so the renamed
//! artifact moves to the end of the order.
//!
//! Every operation either fully applies or leaves the store unchanged.

use crate::naming::resolve_kind;
use crate::{Artifact, Kind, PlaypenError};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// The persisted shape of one artifact: `{ "content": .., "type": .. }`.
#[derive(Serialize, Deserialize)]
struct ArtifactRecord<'a> {
    #[serde(borrow)]
    content: std::borrow::Cow<'a, str>,
    #[serde(rename = "type")]
    kind: Kind,
}

/// Insertion-ordered collection of artifacts keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactStore {
    /// Artifact storage: name -> Artifact
    artifacts: BTreeMap<String, Artifact>,
    /// Names in insertion order.
    order: Vec<String>,
}

impl ArtifactStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an artifact by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.artifacts.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate artifacts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.order.iter().filter_map(|name| self.artifacts.get(name))
    }

    /// Iterate artifact names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Iterate the artifacts of one kind in insertion order.
    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = &Artifact> {
        self.iter().filter(move |artifact| artifact.kind == kind)
    }

    /// The first artifact in insertion order.
    #[must_use]
    pub fn first(&self) -> Option<&Artifact> {
        self.order.first().and_then(|name| self.artifacts.get(name))
    }

    /// Insert or replace an artifact.
    ///
    /// The kind is resolved from `name`. Replacing an existing artifact keeps
    /// its position in the order. Returns the resolved kind.
    pub fn put(&mut self, name: &str, content: impl Into<String>) -> Result<Kind, PlaypenError> {
        let kind = resolve_kind(name)?;
        let artifact = Artifact::new(name, content, kind);

        if self.artifacts.insert(name.to_string(), artifact).is_none() {
            self.order.push(name.to_string());
        }
        Ok(kind)
    }

    /// Replace the content of an existing artifact.
    pub fn set_content(
        &mut self,
        name: &str,
        content: impl Into<String>,
    ) -> Result<(), PlaypenError> {
        let artifact = self
            .artifacts
            .get_mut(name)
            .ok_or_else(|| PlaypenError::ArtifactNotFound(name.to_string()))?;
        artifact.content = content.into();
        Ok(())
    }

    /// Remove an artifact, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Artifact> {
        let removed = self.artifacts.remove(name)?;
        self.order.retain(|n| n != name);
        Some(removed)
    }

    /// Move an artifact to a new name, recomputing its kind.
    ///
    /// # Errors
    ///
    /// - `ArtifactNotFound` if `old` is absent
    /// - `NameCollision` if `new` already exists
    /// - `UnsupportedKind` if `new` does not resolve
    pub fn rename(&mut self, old: &str, new: &str) -> Result<Kind, PlaypenError> {
        if !self.artifacts.contains_key(old) {
            return Err(PlaypenError::ArtifactNotFound(old.to_string()));
        }
        if self.artifacts.contains_key(new) {
            return Err(PlaypenError::NameCollision(new.to_string()));
        }
        let kind = resolve_kind(new)?;

        // All checks passed; from here on nothing can fail.
        let Some(previous) = self.remove(old) else {
            return Err(PlaypenError::ArtifactNotFound(old.to_string()));
        };
        self.artifacts
            .insert(new.to_string(), Artifact::new(new, previous.content, kind));
        self.order.push(new.to_string());
        Ok(kind)
    }
}

// =============================================================================
// SERIALIZATION (ordered JSON object / postcard map)
// =============================================================================

impl Serialize for ArtifactStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for artifact in self.iter() {
            map.serialize_entry(
                &artifact.name,
                &ArtifactRecord {
                    content: std::borrow::Cow::Borrowed(&artifact.content),
                    kind: artifact.kind,
                },
            )?;
        }
        map.end()
    }
}

struct ArtifactStoreVisitor;

impl<'de> Visitor<'de> for ArtifactStoreVisitor {
    type Value = ArtifactStore;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of artifact name to {content, type}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut store = ArtifactStore::new();
        while let Some((name, record)) = access.next_entry::<String, ArtifactRecord<'de>>()? {
            // The stored type is informational; the name is authoritative.
            store
                .put(&name, record.content.into_owned())
                .map_err(serde::de::Error::custom)?;
        }
        Ok(store)
    }
}

impl<'de> Deserialize<'de> for ArtifactStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ArtifactStoreVisitor)
    }
}

// =============================================================================
// TESTS
// =============================================================================
