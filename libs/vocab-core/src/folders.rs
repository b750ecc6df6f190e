//! Folder index: distinct folder names in first-seen order.

use crate::types::Entry;
use serde::{Deserialize, Serialize};

/// Ordered set of folder names derived from the entries in a store.
///
/// Never persisted on its own; rebuilt whenever a store is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderIndex {
    names: Vec<String>,
}

impl FolderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from scratch.
    pub fn rebuild<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.register(&entry.folder);
        }
        index
    }

    /// Append `name` unless it is already present. Returns true if it was added.
    pub fn register(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Drop `name`, keeping the order of the remaining folders.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.names.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}
