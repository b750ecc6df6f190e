//! Store bound to its data file, saving after every mutation.

use crate::analytics::{self, Statistics};
use crate::error::Result;
use crate::persistence;
use crate::quiz::{AnswerFeedback, Question, QuizOutcome, QuizSession};
use crate::review::{self, Flashcard};
use crate::search;
use crate::store::Store;
use crate::types::{Entry, EntryId, LibrarySettings, Scope};
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A vocabulary store together with the file it persists to.
///
/// Mutating methods rewrite the file before returning. When that write
/// fails the in-memory change is kept and the `Io` error is returned, so the
/// caller can retry with [`Vocabulary::save`].
#[derive(Debug, Clone)]
pub struct Vocabulary {
    store: Store,
    path: PathBuf,
}

impl Vocabulary {
    /// Load from the configured data file; unreadable files start empty.
    pub fn open(settings: &LibrarySettings) -> Self {
        Self {
            store: persistence::load(&settings.data_file, settings.capacity),
            path: settings.data_file.clone(),
        }
    }

    /// Like [`Vocabulary::open`] but reports read failures other than a
    /// missing file.
    pub fn try_open(settings: &LibrarySettings) -> Result<Self> {
        Ok(Self {
            store: persistence::read_store(&settings.data_file, settings.capacity)?,
            path: settings.data_file.clone(),
        })
    }

    /// Wrap an existing store.
    pub fn with_store(store: Store, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        persistence::save(&self.store, &self.path).inspect_err(|e| {
            warn!(error = %e, "failed to save vocabulary");
        })
    }

    pub fn add(&mut self, folder: &str, english: &str, chinese: &str) -> Result<Entry> {
        let entry = self.store.add(folder, english, chinese)?;
        self.save()?;
        Ok(entry)
    }

    pub fn delete(&mut self, english: &str) -> Result<Entry> {
        let entry = self.store.delete(english)?;
        self.save()?;
        Ok(entry)
    }

    pub fn delete_by_id(&mut self, id: EntryId) -> Result<Entry> {
        let entry = self.store.delete_by_id(id)?;
        self.save()?;
        Ok(entry)
    }

    pub fn search(&self, keyword: &str) -> Vec<&Entry> {
        search::search(&self.store, keyword)
    }

    pub fn ranked_errors(&self) -> Vec<&Entry> {
        analytics::ranked_errors(&self.store)
    }

    pub fn statistics(&self) -> Statistics {
        analytics::statistics(&self.store)
    }

    pub fn flashcards<R: Rng + ?Sized>(&self, scope: &Scope, rng: &mut R) -> Result<Vec<Flashcard>> {
        review::flashcard_deck(&self.store, scope, rng)
    }

    pub fn start_quiz<R: Rng + ?Sized>(&self, scope: Scope, rng: &mut R) -> Result<QuizSession> {
        QuizSession::start(&self.store, scope, rng)
    }

    /// Submit an answer for the session's current question.
    pub fn answer(&mut self, session: &mut QuizSession, answer: &str) -> Option<AnswerFeedback> {
        session.submit(&mut self.store, answer)
    }

    /// Persist the error counts touched by `session` and return its outcome.
    ///
    /// The session is only borrowed, so its outcome survives a failed save.
    pub fn finish_quiz(&self, session: &QuizSession) -> Result<QuizOutcome> {
        self.save()?;
        Ok(session.outcome())
    }

    /// Run a whole quiz, asking `respond` for each answer, then save.
    pub fn take_quiz<R, F>(&mut self, scope: Scope, rng: &mut R, mut respond: F) -> Result<QuizOutcome>
    where
        R: Rng + ?Sized,
        F: FnMut(&Question) -> String,
    {
        let mut session = self.start_quiz(scope, rng)?;
        while let Some(question) = session.current() {
            let answer = respond(&question);
            session.submit(&mut self.store, &answer);
        }
        self.finish_quiz(&session)
    }
}
