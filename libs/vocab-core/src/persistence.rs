//! Tab-delimited vocabulary file.
//!
//! # Format
//! ```text
//! unit1	apple	蘋果	0
//! unit1	banana	香蕉	2
//! ```
//!
//! One record per line: `folder`, `english`, `chinese`, `error_count`,
//! separated by a single tab. The error count may be missing (older files)
//! and then reads as 0. Fields are not escaped, so a tab or line break inside
//! a field cannot be represented.

use crate::error::{Result, VocabError};
use crate::store::Store;
use crate::types::{Entry, Record};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Result of parsing file content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFile {
    pub records: Vec<Record>,
    /// 1-based numbers of lines that lacked a required field or were not
    /// valid UTF-8.
    pub malformed: Vec<usize>,
}

/// Parse file content into records, skipping malformed lines.
pub fn parse(content: &str) -> ParsedFile {
    parse_bytes(content.as_bytes())
}

/// Parse raw file bytes line by line.
///
/// Each line is decoded on its own, so one undecodable line is skipped
/// without losing the rest of the file.
pub fn parse_bytes(content: &[u8]) -> ParsedFile {
    let mut parsed = ParsedFile::default();

    for (idx, raw) in content.split(|&b| b == b'\n').enumerate() {
        let line_num = idx + 1;
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(_) => {
                parsed.malformed.push(line_num);
                continue;
            }
        };
        match parse_line(line) {
            LineType::Record(record) => parsed.records.push(record),
            LineType::Malformed => parsed.malformed.push(line_num),
            LineType::Empty => {}
        }
    }

    parsed
}

enum LineType {
    Record(Record),
    Malformed,
    Empty,
}

fn parse_line(line: &str) -> LineType {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() {
        return LineType::Empty;
    }

    let mut fields = line.split('\t').map(str::trim);
    let (folder, english, chinese) = match (fields.next(), fields.next(), fields.next()) {
        (Some(f), Some(e), Some(c)) if !f.is_empty() && !e.is_empty() && !c.is_empty() => {
            (f, e, c)
        }
        _ => return LineType::Malformed,
    };
    let error_count = fields.next().map(parse_error_count).unwrap_or(0);

    LineType::Record(Record {
        folder: folder.to_string(),
        english: english.to_string(),
        chinese: chinese.to_string(),
        error_count,
    })
}

/// Non-numeric or negative counts read as 0.
fn parse_error_count(field: &str) -> u32 {
    field.parse::<u32>().unwrap_or(0)
}

/// Format one entry as a line, including the trailing newline.
pub fn format_entry(entry: &Entry) -> String {
    format_line(&entry.folder, &entry.english, &entry.chinese, entry.error_count)
}

/// Format one record as a line, including the trailing newline.
pub fn format_record(record: &Record) -> String {
    format_line(&record.folder, &record.english, &record.chinese, record.error_count)
}

fn format_line(folder: &str, english: &str, chinese: &str, error_count: u32) -> String {
    format!("{}\t{}\t{}\t{}\n", folder, english, chinese, error_count)
}

/// Serialize entries in the given order.
pub fn serialize<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    entries.into_iter().map(format_entry).collect()
}

/// Build a store from parsed records, honoring capacity and the uniqueness key.
pub fn build_store(parsed: ParsedFile, capacity: usize) -> Store {
    let mut store = Store::new(capacity);

    for line in &parsed.malformed {
        warn!(line, "skipping malformed line");
    }

    for record in parsed.records {
        match store.insert_record(record) {
            Ok(_) => {}
            Err(VocabError::CapacityExceeded { capacity }) => {
                warn!(capacity, "store is full, ignoring remaining lines");
                break;
            }
            Err(e) => warn!(error = %e, "skipping record"),
        }
    }

    store
}

/// Read a store from `path`.
///
/// A missing file yields an empty store; any other read failure is returned.
pub fn read_store(path: &Path, capacity: usize) -> Result<Store> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file not found, starting empty");
            return Ok(Store::new(capacity));
        }
        Err(e) => return Err(VocabError::io(path, e)),
    };

    let store = build_store(parse_bytes(&content), capacity);
    debug!(
        path = %path.display(),
        entries = store.len(),
        folders = store.folders().len(),
        "loaded vocabulary"
    );
    Ok(store)
}

/// Load a store from `path`, degrading any read failure to an empty store.
pub fn load(path: &Path, capacity: usize) -> Store {
    read_store(path, capacity).unwrap_or_else(|e| {
        warn!(error = %e, "could not read data file, starting empty");
        Store::new(capacity)
    })
}

/// Rewrite `path` with every entry of `store` in store order.
pub fn save(store: &Store, path: &Path) -> Result<()> {
    save_entries(store.all(), path)
}

/// Truncate `path` and write `entries` to it.
///
/// The write is not atomic: a crash part-way through can leave a truncated
/// file behind.
pub fn save_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>, path: &Path) -> Result<()> {
    write_lines(entries.into_iter().map(format_entry), path)
}

/// Truncate `path` and write `records` to it.
pub fn save_records<'a>(records: impl IntoIterator<Item = &'a Record>, path: &Path) -> Result<()> {
    write_lines(records.into_iter().map(format_record), path)
}

fn write_lines(lines: impl Iterator<Item = String>, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| VocabError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut count = 0usize;

    for line in lines {
        writer
            .write_all(line.as_bytes())
            .map_err(|e| VocabError::io(path, e))?;
        count += 1;
    }
    writer.flush().map_err(|e| VocabError::io(path, e))?;

    debug!(path = %path.display(), lines = count, "wrote vocabulary file");
    Ok(())
}
