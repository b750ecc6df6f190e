//! Migration command tests against temporary files.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use vocab_core::LibrarySettings;
use vocab_migrate::commands::{database_info, export_text, import_text, text_statistics};

const SAMPLE: &str = "u1\tApple\t蘋果\t2\nu1\tbanana\t香蕉\nu1\tbroken\nu2\tcherry\t櫻桃\t0\nu1\tapple\t蘋果\t9\n";

#[test]
fn import_then_export_round_trip() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("english_word.txt");
    let db = dir.path().join("vocabulary.db");
    let out = dir.path().join("export.txt");
    fs::write(&text, SAMPLE).unwrap();

    let report = import_text(&text, &db, false).unwrap();
    assert_eq!(report.imported, 3);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.malformed_lines, vec![3]);
    assert_eq!(report.folders.len(), 2);
    assert_eq!(report.folders[0].folder, "u1");
    assert_eq!(report.folders[0].entries, 2);

    let exported = export_text(&db, &out, false).unwrap();
    assert_eq!(exported.exported, 3);
    assert!(exported.written);
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "u1\tapple\t蘋果\t2\nu1\tbanana\t香蕉\t0\nu2\tcherry\t櫻桃\t0\n"
    );

    let info = database_info(&db).unwrap();
    assert_eq!(info.total_words, 3);
    assert_eq!(info.words_with_errors, 1);
    assert_eq!(info.total_errors, 2);
}

#[test]
fn import_skips_undecodable_line() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("english_word.txt");
    let db = dir.path().join("vocabulary.db");
    let mut content = b"u1\tpear\t\xab\xbc\t0\n".to_vec();
    content.extend_from_slice("u1\tapple\t蘋果\t3\n".as_bytes());
    fs::write(&text, content).unwrap();

    let report = import_text(&text, &db, false).unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.malformed_lines, vec![1]);
}

#[test]
fn import_refuses_to_replace_without_force() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("english_word.txt");
    let db = dir.path().join("vocabulary.db");
    fs::write(&text, SAMPLE).unwrap();

    import_text(&text, &db, false).unwrap();
    assert!(import_text(&text, &db, false).is_err());

    let report = import_text(&text, &db, true).unwrap();
    assert_eq!(report.imported, 3);
}

#[test]
fn import_requires_text_file() {
    let dir = TempDir::new().unwrap();
    let result = import_text(&dir.path().join("missing.txt"), &dir.path().join("v.db"), false);
    assert!(result.is_err());
    assert!(!dir.path().join("v.db").exists());
}

#[test]
fn export_of_empty_database_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("empty.txt");
    let db = dir.path().join("vocabulary.db");
    let out = dir.path().join("export.txt");
    fs::write(&text, "").unwrap();

    import_text(&text, &db, false).unwrap();
    let report = export_text(&db, &out, false).unwrap();
    assert_eq!(report.exported, 0);
    assert!(!report.written);
    assert!(!out.exists());
}

#[test]
fn missing_database_is_an_error() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("absent.db");
    assert!(database_info(&db).is_err());
    assert!(export_text(&db, &dir.path().join("out.txt"), false).is_err());
    assert!(!db.exists());
}

#[test]
fn text_statistics_reads_store() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("english_word.txt");
    fs::write(&text, SAMPLE).unwrap();

    let stats = text_statistics(&LibrarySettings {
        capacity: 100,
        data_file: text,
    })
    .unwrap();
    assert_eq!(stats.entry_count, 3);
    assert_eq!(stats.folder_count, 2);
    assert_eq!(stats.entries_with_errors, 1);
    assert_eq!(stats.total_errors, 2);
}
