//! Quiz engine: shuffled question/answer runs that track error counts.
//!
//! A session snapshots the entries in scope, shuffles them, then takes one
//! answer at a time. A missed answer increments that entry's error count in
//! the store right away, so abandoning a run part-way keeps the misses
//! recorded so far. Persisting the store is the caller's job (see
//! [`crate::Vocabulary::finish_quiz`]).

use crate::error::{Result, VocabError};
use crate::matching::answers_match;
use crate::store::Store;
use crate::types::{EntryId, Scope};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Apply a uniform random permutation (Fisher-Yates) in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// The question currently waiting for an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position in the run.
    pub number: usize,
    pub total: usize,
    pub entry_id: EntryId,
    /// Chinese text shown to the user.
    pub prompt: String,
}

/// Result of submitting one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// The stored english field.
    pub expected: String,
    /// Error count of the entry after this answer.
    pub error_count: u32,
    /// Running score.
    pub score: usize,
    /// Questions answered so far, including this one.
    pub answered: usize,
}

/// A missed question, in the order it was missed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub id: EntryId,
    pub english: String,
    pub chinese: String,
    pub error_count: u32,
}

/// Scored summary of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
    pub wrong: Vec<WrongAnswer>,
}

impl QuizOutcome {
    /// Fraction of correct answers, 0.0 for an empty run.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.wrong.is_empty()
    }
}

#[derive(Debug, Clone)]
struct QuizItem {
    id: EntryId,
    english: String,
    chinese: String,
    error_count: u32,
}

/// One fixed-length quiz run.
#[derive(Debug, Clone)]
pub struct QuizSession {
    scope: Scope,
    items: Vec<QuizItem>,
    position: usize,
    score: usize,
    wrong: Vec<WrongAnswer>,
}

impl QuizSession {
    /// Collect the entries in `scope` and shuffle them.
    ///
    /// Fails with `NoErrors` for an empty error-focused run and `EmptyScope`
    /// for any other empty scope.
    pub fn start<R: Rng + ?Sized>(store: &Store, scope: Scope, rng: &mut R) -> Result<Self> {
        let mut items: Vec<QuizItem> = store
            .entries_in(&scope)
            .map(|e| QuizItem {
                id: e.id,
                english: e.english.clone(),
                chinese: e.chinese.clone(),
                error_count: e.error_count,
            })
            .collect();

        if items.is_empty() {
            return Err(match scope {
                Scope::Errors => VocabError::NoErrors,
                other => VocabError::EmptyScope(other.to_string()),
            });
        }

        shuffle(&mut items, rng);
        debug!(scope = %scope, questions = items.len(), "quiz started");

        Ok(Self {
            scope,
            items,
            position: 0,
            score: 0,
            wrong: Vec::new(),
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Number of questions in the run.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn answered(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.items.len()
    }

    /// Entry ids in the order they are asked.
    pub fn order(&self) -> Vec<EntryId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// The next unanswered question, or `None` once the run is over.
    pub fn current(&self) -> Option<Question> {
        self.items.get(self.position).map(|item| Question {
            number: self.position + 1,
            total: self.items.len(),
            entry_id: item.id,
            prompt: item.chinese.clone(),
        })
    }

    /// Check `answer` against the current question and advance.
    ///
    /// Returns `None` when every question has already been answered.
    pub fn submit(&mut self, store: &mut Store, answer: &str) -> Option<AnswerFeedback> {
        let item = self.items.get(self.position)?;
        let correct = answers_match(answer, &item.english);

        let error_count = if correct {
            self.score += 1;
            store.get(item.id).map_or(item.error_count, |e| e.error_count)
        } else {
            let count = match store.record_miss(item.id) {
                Ok(count) => count,
                Err(e) => {
                    warn!(error = %e, "entry left the store during the quiz");
                    item.error_count
                }
            };
            self.wrong.push(WrongAnswer {
                id: item.id,
                english: item.english.clone(),
                chinese: item.chinese.clone(),
                error_count: count,
            });
            count
        };

        let expected = item.english.clone();
        self.position += 1;

        Some(AnswerFeedback {
            correct,
            expected,
            error_count,
            score: self.score,
            answered: self.position,
        })
    }

    /// Summary of the questions answered so far.
    ///
    /// For a finished run `total` equals the number of questions.
    pub fn outcome(&self) -> QuizOutcome {
        QuizOutcome {
            score: self.score,
            total: self.position,
            wrong: self.wrong.clone(),
        }
    }
}
