//! Flashcard review decks.

use crate::error::{Result, VocabError};
use crate::quiz::shuffle;
use crate::store::Store;
use crate::types::{EntryId, Scope};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One card: english on the front, chinese on the back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: EntryId,
    pub english: String,
    pub chinese: String,
    pub error_count: u32,
}

/// Shuffled cards for every entry in `scope`. Reviewing never touches the store.
pub fn flashcard_deck<R: Rng + ?Sized>(
    store: &Store,
    scope: &Scope,
    rng: &mut R,
) -> Result<Vec<Flashcard>> {
    let mut deck: Vec<Flashcard> = store
        .entries_in(scope)
        .map(|e| Flashcard {
            id: e.id,
            english: e.english.clone(),
            chinese: e.chinese.clone(),
            error_count: e.error_count,
        })
        .collect();

    if deck.is_empty() {
        return Err(VocabError::EmptyScope(scope.to_string()));
    }

    shuffle(&mut deck, rng);
    Ok(deck)
}
