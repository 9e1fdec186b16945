//! Error helpers for routinex-store
//!
//! Every storage failure is an `Internal` [`ExError`], except UNIQUE
//! violations on routine names, which surface as `Conflict`.

use routinex_core::errors::{ExError, ExErrorKind};
use rusqlite::ffi;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Wrap a rusqlite error raised while running `op`
pub fn from_rusqlite(op: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op.to_string())
        .with_message(err.to_string())
}

/// Wrap a rusqlite error, mapping UNIQUE violations to `Conflict`
pub fn from_rusqlite_unique(op: &str, entity_id: &str, err: rusqlite::Error) -> ExError {
    if is_unique_violation(&err) {
        return ExError::new(ExErrorKind::Conflict)
            .with_op(op.to_string())
            .with_entity_id(entity_id.to_string())
            .with_message("routine name already taken");
    }
    from_rusqlite(op, err)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// A stored timestamp that does not fit `DateTime<Utc>`
pub fn corrupt_timestamp(op: &str, value: i64) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op.to_string())
        .with_message(format!("stored timestamp {} is out of range", value))
}

pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("migration")
        .with_entity_id(migration_id.to_string())
        .with_message(format!("migration {} failed: {}", migration_id, reason))
}

/// An applied migration whose embedded SQL has since changed
pub fn checksum_mismatch(migration_id: &str, recorded: &str, embedded: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("migration_checksum")
        .with_entity_id(migration_id.to_string())
        .with_message(format!(
            "checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, recorded, embedded
        ))
}

pub fn io_error(op: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op.to_string())
        .with_message(err.to_string())
}
