//! # Folder Index
//!
//! Maps folder names to ordered lists of artifact names.
//!
//! Folders are a view over membership, not independent entities: a folder
//! that loses its last member is removed in the same operation. The one
//! exception is a placeholder registered by `create_placeholder`, which
//! stays until it receives its first member (and is never persisted while
//! empty).

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Insertion-ordered folder membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderIndex {
    /// Membership storage: folder -> ordered member names
    members: BTreeMap<String, Vec<String>>,
    /// Folder names in creation order.
    order: Vec<String>,
}

impl FolderIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the members of a folder.
    #[must_use]
    pub fn members(&self, folder: &str) -> Option<&[String]> {
        self.members.get(folder).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains_folder(&self, folder: &str) -> bool {
        self.members.contains_key(folder)
    }

    /// True if the folder exists and has at least one member.
    #[must_use]
    pub fn is_populated(&self, folder: &str) -> bool {
        self.members.get(folder).is_some_and(|m| !m.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate `(folder, members)` in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order.iter().filter_map(|name| {
            self.members
                .get(name)
                .map(|members| (name.as_str(), members.as_slice()))
        })
    }

    /// True if any folder lists `artifact`.
    #[must_use]
    pub fn is_member(&self, artifact: &str) -> bool {
        self.members.values().any(|m| m.iter().any(|n| n == artifact))
    }

    /// Add `artifact` to `folder`, creating the folder if needed.
    ///
    /// Idempotent: a name already present is not appended again.
    pub fn add_member(&mut self, folder: &str, artifact: &str) {
        let members = self.entry(folder);
        if !members.iter().any(|m| m == artifact) {
            members.push(artifact.to_string());
        }
    }

    /// Register an empty folder that survives until its first member arrives.
    ///
    /// Does nothing if the folder already exists.
    pub fn create_placeholder(&mut self, folder: &str) {
        self.entry(folder);
    }

    /// Remove `artifact` from every folder.
    ///
    /// Folders emptied by this call are deleted. Returns the names of the
    /// deleted folders.
    pub fn remove_member(&mut self, artifact: &str) -> Vec<String> {
        let mut emptied = Vec::new();
        for (folder, members) in &mut self.members {
            let before = members.len();
            members.retain(|m| m != artifact);
            if members.len() != before && members.is_empty() {
                emptied.push(folder.clone());
            }
        }

        for folder in &emptied {
            self.members.remove(folder);
        }
        self.order.retain(|name| !emptied.contains(name));
        emptied
    }

    /// Replace `old` with `new` in place, preserving folder and position.
    ///
    /// Returns the number of folders updated.
    pub fn rename_member(&mut self, old: &str, new: &str) -> usize {
        let mut updated = 0;
        for members in self.members.values_mut() {
            if let Some(slot) = members.iter_mut().find(|m| m.as_str() == old) {
                *slot = new.to_string();
                updated += 1;
            }
        }
        updated
    }

    fn entry(&mut self, folder: &str) -> &mut Vec<String> {
        if !self.members.contains_key(folder) {
            self.order.push(folder.to_string());
        }
        self.members.entry(folder.to_string()).or_default()
    }
}

// =============================================================================
// SERIALIZATION
// =============================================================================

impl Serialize for FolderIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Placeholders are session-local and never written.
        let populated: Vec<_> = self.iter().filter(|(_, m)| !m.is_empty()).collect();
        let mut map = serializer.serialize_map(Some(populated.len()))?;
        for (folder, members) in populated {
            map.serialize_entry(folder, members)?;
        }
        map.end()
    }
}

struct FolderIndexVisitor;

impl<'de> Visitor<'de> for FolderIndexVisitor {
    type Value = FolderIndex;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of folder name to artifact names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut index = FolderIndex::new();
        while let Some((folder, members)) = access.next_entry::<String, Vec<String>>()? {
            for member in &members {
                index.add_member(&folder, member);
            }
        }
        Ok(index)
    }
}

impl<'de> Deserialize<'de> for FolderIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FolderIndexVisitor)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_member_creates_folder_and_appends() {
        let mut index = FolderIndex::new();
        index.add_member("src", "a.js");
        index.add_member("src", "b.js");

        assert_eq!(
            index.members("src"),
            Some(&["a.js".to_string(), "b.js".to_string()][..])
        );
    }

    #[test]
    fn add_member_is_idempotent() {
        let mut once = FolderIndex::new();
        once.add_member("src", "a.js");

        let mut twice = FolderIndex::new();
        twice.add_member("src", "a.js");
        twice.add_member("src", "a.js");

        assert_eq!(once, twice);
    }

    #[test]
    fn remove_last_member_deletes_folder() {
        let mut index = FolderIndex::new();
        index.add_member("lib", "a.js");
        index.add_member("src", "b.js");
        index.add_member("src", "c.js");

        let emptied = index.remove_member("a.js");

        assert_eq!(emptied, vec!["lib".to_string()]);
        assert!(!index.contains_folder("lib"));
        assert_eq!(index.iter().map(|(f, _)| f).collect::<Vec<_>>(), vec!["src"]);
    }

    #[test]
    fn remove_member_clears_every_folder() {
        let mut index = FolderIndex::new();
        index.add_member("a", "x.js");
        index.add_member("b", "x.js");
        index.add_member("b", "y.js");

        index.remove_member("x.js");

        assert!(!index.is_member("x.js"));
        assert!(!index.contains_folder("a"));
        assert_eq!(index.members("b"), Some(&["y.js".to_string()][..]));
    }

    #[test]
    fn placeholder_survives_unrelated_removal() {
        let mut index = FolderIndex::new();
        index.add_member("src", "a.js");
        index.create_placeholder("assets");

        index.remove_member("a.js");

        assert!(index.contains_folder("assets"));
        assert!(!index.is_populated("assets"));
    }

    #[test]
    fn rename_member_preserves_position() {
        let mut index = FolderIndex::new();
        index.add_member("src", "a.js");
        index.add_member("src", "b.js");
        index.add_member("src", "c.js");

        assert_eq!(index.rename_member("b.js", "b.ts"), 1);
        assert_eq!(
            index.members("src"),
            Some(&["a.js".to_string(), "b.ts".to_string(), "c.js".to_string()][..])
        );
    }

    #[test]
    fn serialization_skips_placeholders() {
        let mut index = FolderIndex::new();
        index.add_member("src", "index.html");
        index.create_placeholder("empty");

        let json = serde_json::to_string(&index).expect("serialize");
        assert_eq!(json, r#"{"src":["index.html"]}"#);
    }

    #[test]
    fn deserialization_drops_duplicates_and_empty_folders() {
        let json = r#"{"src":["a.js","a.js","b.js"],"empty":[]}"#;
        let index: FolderIndex = serde_json::from_str(json).expect("deserialize");

        assert_eq!(
            index.members("src"),
            Some(&["a.js".to_string(), "b.js".to_string()][..])
        );
        assert!(!index.contains_folder("empty"));
    }
}
