//! Fixtures for the external collaborators (exercise catalog, user directory)

use std::time::Instant;

use routinex_core::{log_op_end, log_op_start};
use routinex_store::errors::Result;
use routinex_store::SqliteStore;
use rusqlite::Connection;

use super::{elapsed_ms, fail};

/// # Errors
///
/// - `Internal`: database failure
pub fn exercise_register(conn: &Connection, exercise_id: &str, name: &str) -> Result<()> {
    const OP: &str = "exercise_register";
    log_op_start!(OP, exercise_id = exercise_id);
    let start = Instant::now();

    SqliteStore::new(conn)
        .register_exercise(exercise_id, name)
        .map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start));
    Ok(())
}

/// # Errors
///
/// - `Internal`: database failure
pub fn user_register(conn: &Connection, user_id: &str) -> Result<()> {
    const OP: &str = "user_register";
    log_op_start!(OP, user_id = user_id);
    let start = Instant::now();

    SqliteStore::new(conn)
        .register_user(user_id)
        .map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start));
    Ok(())
}
