//! Error ranking and library statistics.

use crate::store::Store;
use crate::types::Entry;
use serde::{Deserialize, Serialize};

/// Entries with at least one error, most-missed first.
///
/// Ties keep their store order. An empty result means nothing has been
/// missed yet.
pub fn ranked_errors(store: &Store) -> Vec<&Entry> {
    rank_by_errors(store.all())
}

/// Rank any slice of entries the same way as [`ranked_errors`].
pub fn rank_by_errors(entries: &[Entry]) -> Vec<&Entry> {
    let mut ranked: Vec<&Entry> = entries.iter().filter(|e| e.error_count > 0).collect();
    // sort_by is stable, so equal counts keep their relative order.
    ranked.sort_by(|a, b| b.error_count.cmp(&a.error_count));
    ranked
}

/// Number of entries in one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderCount {
    pub folder: String,
    pub entries: usize,
}

/// Summary counts for a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub folder_count: usize,
    pub entry_count: usize,
    pub entries_with_errors: usize,
    pub total_errors: u64,
    /// Per-folder counts in folder index order.
    pub folders: Vec<FolderCount>,
}

pub fn statistics(store: &Store) -> Statistics {
    let entries = store.all();
    let folders = store
        .folders()
        .iter()
        .map(|name| FolderCount {
            folder: name.to_string(),
            entries: entries.iter().filter(|e| e.folder == name).count(),
        })
        .collect();

    Statistics {
        folder_count: store.folders().len(),
        entry_count: entries.len(),
        entries_with_errors: entries.iter().filter(|e| e.error_count > 0).count(),
        total_errors: entries.iter().map(|e| u64::from(e.error_count)).sum(),
        folders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryId;
    use pretty_assertions::assert_eq;

    fn entry(id: u64, english: &str, error_count: u32) -> Entry {
        Entry {
            id: EntryId(id),
            folder: "u1".to_string(),
            english: english.to_string(),
            chinese: "字".to_string(),
            error_count,
        }
    }

    #[test]
    fn ranking_is_stable_for_ties() {
        let entries = vec![
            entry(1, "a", 5),
            entry(2, "b", 3),
            entry(3, "c", 5),
            entry(4, "d", 2),
        ];
        let ranked: Vec<_> = rank_by_errors(&entries).iter().map(|e| e.id.0).collect();
        assert_eq!(ranked, vec![1, 3, 2, 4]);
    }

    #[test]
    fn ranking_skips_clean_entries() {
        let entries = vec![entry(1, "a", 0), entry(2, "b", 1), entry(3, "c", 0)];
        let ranked: Vec<_> = rank_by_errors(&entries).iter().map(|e| e.id.0).collect();
        assert_eq!(ranked, vec![2]);
    }

    #[test]
    fn no_errors_yet() {
        let mut store = Store::new(10);
        store.add("u1", "apple", "蘋果").unwrap();
        assert!(ranked_errors(&store).is_empty());
    }

    #[test]
    fn statistics_counts_folders_in_index_order() {
        let mut store = Store::new(10);
        store.add("u2", "apple", "蘋果").unwrap();
        let banana = store.add("u1", "banana", "香蕉").unwrap();
        store.add("u2", "cherry", "櫻桃").unwrap();
        store.record_miss(banana.id).unwrap();
        store.record_miss(banana.id).unwrap();

        let stats = statistics(&store);
        assert_eq!(
            stats,
            Statistics {
                folder_count: 2,
                entry_count: 3,
                entries_with_errors: 1,
                total_errors: 2,
                folders: vec![
                    FolderCount {
                        folder: "u2".to_string(),
                        entries: 2
                    },
                    FolderCount {
                        folder: "u1".to_string(),
                        entries: 1
                    },
                ],
            }
        );
    }
}
