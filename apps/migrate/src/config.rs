//! Environment configuration.

use anyhow::{Context, Result};
use std::path::PathBuf;
use vocab_core::{LibrarySettings, DEFAULT_CAPACITY, DEFAULT_DATA_FILE};

/// Default SQLite database path.
pub const DEFAULT_DB_PATH: &str = "vocabulary.db";

/// Paths and limits, read from `VOCAB_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub db_path: PathBuf,
    pub capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let capacity = match lookup("VOCAB_CAPACITY") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("VOCAB_CAPACITY must be a number, got '{}'", raw))?,
            None => defaults.capacity,
        };

        Ok(Self {
            data_file: lookup("VOCAB_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            db_path: lookup("VOCAB_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            capacity,
        })
    }

    pub fn library_settings(&self) -> LibrarySettings {
        LibrarySettings {
            capacity: self.capacity,
            data_file: self.data_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("VOCAB_DATA_FILE", "words.txt"),
            ("VOCAB_DB_PATH", "words.db"),
            ("VOCAB_CAPACITY", " 50 "),
        ]))
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("words.txt"));
        assert_eq!(config.db_path, PathBuf::from("words.db"));
        assert_eq!(config.library_settings().capacity, 50);
    }

    #[test]
    fn rejects_bad_capacity() {
        let err = Config::from_lookup(lookup(&[("VOCAB_CAPACITY", "lots")])).unwrap_err();
        assert!(err.to_string().contains("VOCAB_CAPACITY"));
    }
}
