//! Error types for vocab-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using VocabError.
pub type Result<T> = std::result::Result<T, VocabError>;

/// Errors returned by store, persistence and quiz operations.
///
/// None of these are fatal: the store is left unchanged whenever an
/// operation fails.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("vocabulary is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("entry already exists: {english} - {chinese} (folder: {folder})")]
    DuplicateEntry {
        folder: String,
        english: String,
        chinese: String,
    },

    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: &'static str },

    #[error("nothing to test in {0}")]
    EmptyScope(String),

    #[error("no entries with recorded errors")]
    NoErrors,

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VocabError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
