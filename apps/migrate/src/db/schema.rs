//! SQLite schema definitions.

/// Words table with the same uniqueness key as the text store.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS words (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    folder TEXT NOT NULL,
    english TEXT NOT NULL,
    chinese TEXT NOT NULL,
    error_count INTEGER NOT NULL DEFAULT 0,
    UNIQUE (folder, english, chinese)
);

CREATE INDEX IF NOT EXISTS idx_folder ON words(folder);
CREATE INDEX IF NOT EXISTS idx_english ON words(english);
"#;
