//! Core types for the vocabulary library.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default maximum number of entries a store accepts.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "english_word.txt";

/// Stable identifier assigned by the store when an entry is created or loaded.
///
/// Ids are never reused within one store and are not written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One vocabulary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub folder: String,
    /// Always stored ASCII-lowercased.
    pub english: String,
    pub chinese: String,
    pub error_count: u32,
}

impl Entry {
    /// Whether this entry has the same (folder, english, chinese) key.
    pub fn same_key(&self, folder: &str, english: &str, chinese: &str) -> bool {
        self.folder == folder && self.english == english && self.chinese == chinese
    }
}

/// A record as it appears in the data file, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub folder: String,
    pub english: String,
    pub chinese: String,
    pub error_count: u32,
}

/// Subset of entries a quiz, review or listing operates over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "folder")]
pub enum Scope {
    All,
    Folder(String),
    /// Entries with at least one recorded error.
    Errors,
}

impl Scope {
    /// Whether an entry falls inside this scope.
    pub fn contains(&self, entry: &Entry) -> bool {
        match self {
            Self::All => true,
            Self::Folder(name) => entry.folder == *name,
            Self::Errors => entry.error_count > 0,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all entries"),
            Self::Folder(name) => write!(f, "folder '{}'", name),
            Self::Errors => f.write_str("error list"),
        }
    }
}

/// Library configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Maximum number of entries; adds beyond it fail.
    pub capacity: usize,
    /// Tab-delimited file the store is loaded from and saved to.
    pub data_file: PathBuf,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}
