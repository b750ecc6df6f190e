//! Core vocabulary library shared by the command-line tools.
//!
//! Provides:
//! - Bounded, deduplicated entry store with a derived folder index
//! - Tab-delimited file persistence
//! - Shuffled quiz sessions that track per-entry error counts
//! - Error ranking, statistics, substring search and flashcard decks

pub mod analytics;
pub mod error;
pub mod folders;
pub mod library;
pub mod matching;
pub mod persistence;
pub mod quiz;
pub mod review;
pub mod search;
pub mod store;
pub mod types;

pub use analytics::{ranked_errors, statistics, FolderCount, Statistics};
pub use error::{Result, VocabError};
pub use folders::FolderIndex;
pub use library::Vocabulary;
pub use quiz::{AnswerFeedback, Question, QuizOutcome, QuizSession, WrongAnswer};
pub use review::{flashcard_deck, Flashcard};
pub use search::search;
pub use store::Store;
pub use types::{Entry, EntryId, LibrarySettings, Record, Scope, DEFAULT_CAPACITY, DEFAULT_DATA_FILE};
