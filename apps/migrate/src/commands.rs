//! Text file <-> SQLite migration commands.

use crate::db::{DatabaseInfo, FolderOrder, SqliteRepository};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use vocab_core::{persistence, FolderCount, LibrarySettings, Statistics};

#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub duplicates: usize,
    /// 1-based line numbers that were skipped.
    pub malformed_lines: Vec<usize>,
    /// Per-folder totals in the database, by folder name.
    pub folders: Vec<FolderCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub exported: usize,
    /// False when the database was empty and no file was written.
    pub written: bool,
}

/// Import a vocabulary text file into a new database.
///
/// An existing database is only replaced when `overwrite` is set.
pub fn import_text(text_file: &Path, db_path: &Path, overwrite: bool) -> Result<ImportReport> {
    let content = fs::read(text_file)
        .with_context(|| format!("failed to read {}", text_file.display()))?;

    if db_path.exists() {
        if !overwrite {
            bail!(
                "database {} already exists (use --force to replace it)",
                db_path.display()
            );
        }
        fs::remove_file(db_path)
            .with_context(|| format!("failed to remove {}", db_path.display()))?;
    }

    let parsed = persistence::parse_bytes(&content);
    for line in &parsed.malformed {
        tracing::warn!(line, "skipping malformed line");
    }

    let mut repo = SqliteRepository::open(db_path)?;
    let counts = repo.import_records(&parsed.records)?;
    tracing::info!(
        imported = counts.imported,
        duplicates = counts.duplicates,
        malformed = parsed.malformed.len(),
        "import finished"
    );

    Ok(ImportReport {
        imported: counts.imported,
        duplicates: counts.duplicates,
        malformed_lines: parsed.malformed,
        folders: repo.folder_counts(FolderOrder::ByName)?,
    })
}

/// Export every word of a database to a vocabulary text file.
pub fn export_text(db_path: &Path, out_file: &Path, overwrite: bool) -> Result<ExportReport> {
    let repo = open_existing(db_path)?;

    if out_file.exists() && !overwrite {
        bail!(
            "{} already exists (use --force to replace it)",
            out_file.display()
        );
    }

    let records = repo.all_records()?;
    if records.is_empty() {
        tracing::warn!(db = %db_path.display(), "database is empty, nothing to export");
        return Ok(ExportReport {
            exported: 0,
            written: false,
        });
    }

    persistence::save_records(&records, out_file)?;
    tracing::info!(exported = records.len(), out = %out_file.display(), "export finished");

    Ok(ExportReport {
        exported: records.len(),
        written: true,
    })
}

pub fn database_info(db_path: &Path) -> Result<DatabaseInfo> {
    Ok(open_existing(db_path)?.info()?)
}

/// Statistics for the configured text file.
pub fn text_statistics(settings: &LibrarySettings) -> Result<Statistics> {
    let store = persistence::read_store(&settings.data_file, settings.capacity)?;
    Ok(vocab_core::statistics(&store))
}

fn open_existing(db_path: &Path) -> Result<SqliteRepository> {
    // Connection::open would silently create an empty database.
    if !db_path.exists() {
        bail!("database {} not found", db_path.display());
    }
    Ok(SqliteRepository::open(db_path)?)
}
