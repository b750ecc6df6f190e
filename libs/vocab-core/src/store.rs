//! Record store: bounded, deduplicated collection of entries.

use crate::error::{Result, VocabError};
use crate::folders::FolderIndex;
use crate::matching::normalize_english;
use crate::types::{Entry, EntryId, LibrarySettings, Record, Scope};
use tracing::debug;

/// Owned collection of entries plus its derived folder index.
///
/// Invariants held after every operation:
/// - `len() <= capacity()`
/// - no two entries share the same (folder, english, chinese) key
/// - the folder index lists exactly the folders present in the entries
#[derive(Debug, Clone)]
pub struct Store {
    entries: Vec<Entry>,
    folders: FolderIndex,
    capacity: usize,
    next_id: u64,
}

impl Store {
    /// Create an empty store that accepts at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            folders: FolderIndex::new(),
            capacity,
            next_id: 1,
        }
    }

    pub fn with_settings(settings: &LibrarySettings) -> Self {
        Self::new(settings.capacity)
    }

    /// Add a new entry with an error count of zero.
    ///
    /// The english field is ASCII-lowercased; all fields are trimmed.
    pub fn add(&mut self, folder: &str, english: &str, chinese: &str) -> Result<Entry> {
        self.check_capacity()?;

        let folder = validate_field("folder", folder)?;
        let english = normalize_english(&validate_field("english", english)?);
        let chinese = validate_field("chinese", chinese)?;

        let entry = self.insert(Record {
            folder,
            english,
            chinese,
            error_count: 0,
        })?;
        debug!(id = %entry.id, folder = %entry.folder, english = %entry.english, "entry added");
        Ok(entry.clone())
    }

    /// Insert a record read from disk, keeping its error count.
    pub(crate) fn insert_record(&mut self, mut record: Record) -> Result<&Entry> {
        self.check_capacity()?;
        record.english = normalize_english(&record.english);
        self.insert(record)
    }

    fn insert(&mut self, record: Record) -> Result<&Entry> {
        if self
            .entries
            .iter()
            .any(|e| e.same_key(&record.folder, &record.english, &record.chinese))
        {
            return Err(VocabError::DuplicateEntry {
                folder: record.folder,
                english: record.english,
                chinese: record.chinese,
            });
        }

        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.folders.register(&record.folder);
        self.entries.push(Entry {
            id,
            folder: record.folder,
            english: record.english,
            chinese: record.chinese,
            error_count: record.error_count,
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Remove the first entry whose english field matches, ignoring ASCII case.
    ///
    /// The last entry is moved into the freed slot, so store order changes.
    pub fn delete(&mut self, english: &str) -> Result<Entry> {
        let key = normalize_english(english);
        let idx = self
            .entries
            .iter()
            .position(|e| e.english == key)
            .ok_or_else(|| VocabError::NotFound(format!("'{}'", key)))?;
        Ok(self.remove_at(idx))
    }

    /// Remove one entry by its stable id.
    pub fn delete_by_id(&mut self, id: EntryId) -> Result<Entry> {
        let idx = self
            .position(id)
            .ok_or_else(|| VocabError::NotFound(id.to_string()))?;
        Ok(self.remove_at(idx))
    }

    fn remove_at(&mut self, idx: usize) -> Entry {
        let removed = self.entries.swap_remove(idx);
        if !self.entries.iter().any(|e| e.folder == removed.folder) {
            self.folders.remove(&removed.folder);
        }
        debug!(id = %removed.id, english = %removed.english, "entry deleted");
        removed
    }

    /// Increment the error count of an entry after a missed answer.
    pub(crate) fn record_miss(&mut self, id: EntryId) -> Result<u32> {
        let idx = self
            .position(id)
            .ok_or_else(|| VocabError::NotFound(id.to_string()))?;
        let entry = &mut self.entries[idx];
        entry.error_count = entry.error_count.saturating_add(1);
        Ok(entry.error_count)
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn check_capacity(&self) -> Result<()> {
        if self.is_full() {
            return Err(VocabError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All live entries in store order.
    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries inside `scope`, in store order.
    pub fn entries_in<'a>(&'a self, scope: &'a Scope) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| scope.contains(e))
    }

    pub fn folders(&self) -> &FolderIndex {
        &self.folders
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }
}

fn validate_field(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(VocabError::InvalidField {
            field,
            reason: "must not be empty",
        });
    }
    if value.contains(['\t', '\n', '\r']) {
        return Err(VocabError::InvalidField {
            field,
            reason: "must not contain tabs or line breaks",
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Store {
        let mut store = Store::new(10);
        store.add("u1", "apple", "蘋果").unwrap();
        store.add("u1", "banana", "香蕉").unwrap();
        store
    }

    #[test]
    fn add_lowercases_english_only() {
        let mut store = Store::new(10);
        let entry = store.add(" Unit1 ", "APPLE", "蘋果 ").unwrap();
        assert_eq!(entry.folder, "Unit1");
        assert_eq!(entry.english, "apple");
        assert_eq!(entry.chinese, "蘋果");
        assert_eq!(entry.error_count, 0);
    }

    #[test]
    fn add_at_capacity_fails_without_mutation() {
        let mut store = Store::new(2);
        store.add("u1", "apple", "蘋果").unwrap();
        store.add("u1", "banana", "香蕉").unwrap();
        let before = store.all().to_vec();

        let result = store.add("u2", "cherry", "櫻桃");
        assert!(matches!(result, Err(VocabError::CapacityExceeded { capacity: 2 })));
        assert_eq!(store.all(), &before[..]);
        assert!(!store.folders().contains("u2"));
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut store = Store::new(0);
        assert!(matches!(
            store.add("u1", "apple", "蘋果"),
            Err(VocabError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn duplicate_triple_rejected() {
        let mut store = sample();
        let result = store.add("u1", "Apple", "蘋果");
        assert!(matches!(result, Err(VocabError::DuplicateEntry { .. })));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn changing_any_key_field_is_allowed() {
        let mut store = sample();
        store.add("u2", "apple", "蘋果").unwrap();
        store.add("u1", "apple", "蘋果公司").unwrap();
        store.add("u1", "apples", "蘋果").unwrap();
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn invalid_fields_rejected() {
        let mut store = Store::new(10);
        assert!(matches!(
            store.add("", "apple", "蘋果"),
            Err(VocabError::InvalidField { field: "folder", .. })
        ));
        assert!(matches!(
            store.add("u1", "   ", "蘋果"),
            Err(VocabError::InvalidField { field: "english", .. })
        ));
        assert!(matches!(
            store.add("u1", "apple", "蘋\t果"),
            Err(VocabError::InvalidField { field: "chinese", .. })
        ));
        assert!(store.is_empty());
        assert!(store.folders().is_empty());
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = sample();
        let removed = store.delete("APPLE").unwrap();
        assert_eq!(removed.english, "apple");
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].english, "banana");
        assert_eq!(store.all()[0].chinese, "香蕉");
        assert_eq!(store.all()[0].folder, "u1");
    }

    #[test]
    fn delete_swaps_last_into_slot() {
        let mut store = sample();
        store.add("u2", "cherry", "櫻桃").unwrap();
        store.delete("apple").unwrap();
        let order: Vec<_> = store.all().iter().map(|e| e.english.as_str()).collect();
        assert_eq!(order, vec!["cherry", "banana"]);
    }

    #[test]
    fn delete_first_match_only() {
        let mut store = sample();
        store.add("u2", "apple", "蘋果").unwrap();
        let removed = store.delete("apple").unwrap();
        assert_eq!(removed.folder, "u1");
        assert_eq!(store.all().iter().filter(|e| e.english == "apple").count(), 1);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut store = sample();
        assert!(matches!(store.delete("grape"), Err(VocabError::NotFound(_))));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn deleting_last_entry_of_folder_drops_folder() {
        let mut store = sample();
        store.add("u2", "cherry", "櫻桃").unwrap();
        store.delete("cherry").unwrap();
        assert_eq!(store.folders().iter().collect::<Vec<_>>(), vec!["u1"]);
        store.delete("apple").unwrap();
        assert!(store.folders().contains("u1"));
    }

    #[test]
    fn ids_are_stable_across_swap_remove() {
        let mut store = sample();
        let cherry = store.add("u2", "cherry", "櫻桃").unwrap();
        store.delete("apple").unwrap();
        assert_eq!(store.get(cherry.id).map(|e| e.english.as_str()), Some("cherry"));

        let removed = store.delete_by_id(cherry.id).unwrap();
        assert_eq!(removed.english, "cherry");
        assert!(store.get(cherry.id).is_none());

        // Ids are never reused.
        let grape = store.add("u2", "grape", "葡萄").unwrap();
        assert!(grape.id > cherry.id);
    }

    #[test]
    fn record_miss_increments() {
        let mut store = sample();
        let id = store.all()[0].id;
        assert_eq!(store.record_miss(id).unwrap(), 1);
        assert_eq!(store.record_miss(id).unwrap(), 2);
        assert_eq!(store.get(id).unwrap().error_count, 2);
    }

    #[test]
    fn entries_in_scope() {
        let mut store = sample();
        store.add("u2", "cherry", "櫻桃").unwrap();
        let scope = Scope::Folder("u1".to_string());
        assert_eq!(store.entries_in(&scope).count(), 2);
        assert_eq!(store.entries_in(&Scope::All).count(), 3);
        assert_eq!(store.entries_in(&Scope::Errors).count(), 0);
    }
}
