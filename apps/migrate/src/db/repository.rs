//! Repository pattern for database access.

use crate::db::error::DbError;
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;
use vocab_core::matching::normalize_english;
use vocab_core::{FolderCount, Record};

type Result<T> = std::result::Result<T, DbError>;

/// Counts from one import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportCounts {
    pub imported: usize,
    /// Rows whose (folder, english, chinese) key was already present.
    pub duplicates: usize,
}

/// Summary of the database contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseInfo {
    pub total_words: usize,
    pub folder_count: usize,
    pub words_with_errors: usize,
    pub total_errors: u64,
    /// Largest folders first.
    pub folders: Vec<FolderCount>,
}

/// Ordering for per-folder counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderOrder {
    ByName,
    BySizeDesc,
}

/// SQLite-backed word storage.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        Ok(())
    }

    /// Insert records in a single transaction, skipping existing keys.
    pub fn import_records(&mut self, records: &[Record]) -> Result<ImportCounts> {
        let tx = self.conn.transaction()?;
        let mut counts = ImportCounts::default();

        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO words (folder, english, chinese, error_count) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in records {
                let changed = stmt.execute(params![
                    record.folder,
                    normalize_english(&record.english),
                    record.chinese,
                    record.error_count,
                ])?;
                if changed == 0 {
                    tracing::warn!(
                        folder = %record.folder,
                        english = %record.english,
                        "duplicate word skipped"
                    );
                    counts.duplicates += 1;
                } else {
                    counts.imported += 1;
                }
            }
        }

        tx.commit()?;
        Ok(counts)
    }

    /// All words ordered by folder, then english.
    pub fn all_records(&self) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(
            "SELECT folder, english, chinese, error_count FROM words ORDER BY folder, english",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(folder, english, chinese, error_count)| {
                let error_count = u32::try_from(error_count).map_err(|_| {
                    DbError::InvalidData(format!(
                        "error_count {} for '{}' is out of range",
                        error_count, english
                    ))
                })?;
                Ok(Record {
                    folder,
                    english,
                    chinese,
                    error_count,
                })
            })
            .collect()
    }

    pub fn folder_counts(&self, order: FolderOrder) -> Result<Vec<FolderCount>> {
        let sql = match order {
            FolderOrder::ByName => {
                "SELECT folder, COUNT(*) FROM words GROUP BY folder ORDER BY folder"
            }
            FolderOrder::BySizeDesc => {
                "SELECT folder, COUNT(*) AS count FROM words GROUP BY folder ORDER BY count DESC, folder"
            }
        };

        let mut stmt = self.conn.prepare(sql)?;
        let counts = stmt
            .query_map([], |row| {
                Ok(FolderCount {
                    folder: row.get(0)?,
                    entries: row.get::<_, i64>(1)? as usize,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(counts)
    }

    pub fn info(&self) -> Result<DatabaseInfo> {
        let (total_words, folder_count, words_with_errors, total_errors) = self.conn.query_row(
            "SELECT COUNT(*),
                    COUNT(DISTINCT folder),
                    COALESCE(SUM(CASE WHEN error_count > 0 THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(error_count), 0)
             FROM words",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            },
        )?;

        Ok(DatabaseInfo {
            total_words: total_words as usize,
            folder_count: folder_count as usize,
            words_with_errors: words_with_errors as usize,
            total_errors: total_errors.max(0) as u64,
            folders: self.folder_counts(FolderOrder::BySizeDesc)?,
        })
    }
}
