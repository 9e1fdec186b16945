//! SQLite implementations of the core collaborator traits

pub mod sqlite_repo;

pub use sqlite_repo::SqliteStore;
