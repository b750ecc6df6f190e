//! SQLite word database.

pub mod error;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use repository::{DatabaseInfo, FolderOrder, ImportCounts, SqliteRepository};
