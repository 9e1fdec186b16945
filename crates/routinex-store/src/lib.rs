//! RoutineX Store - SQLite persistence
//!
//! Provides:
//! - Connection helpers that configure pragmas and migrate on open
//! - Embedded SQL migrations with checksum bookkeeping
//! - [`SqliteStore`], implementing every collaborator trait of
//!   `routinex-core` on one connection

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use errors::Result;
pub use repo::SqliteStore;
