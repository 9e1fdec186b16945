//! Routine Composition Manager handlers

use std::time::Instant;

use routinex_core::model::{Actor, EntryPatch, NewExerciseEntry, Routine};
use routinex_core::ops::routine_ops;
use routinex_core::policy::ensure_known_actor;
use routinex_core::{log_op_end, log_op_start};
use routinex_store::errors::Result;
use routinex_store::SqliteStore;
use rusqlite::Connection;

use super::{elapsed_ms, fail};

/// Create a routine owned by `actor`
///
/// # Errors
///
/// - `InvalidInput`: blank name or actor
/// - `Conflict`: the normalized name is taken
pub fn routine_create(conn: &Connection, name: &str, actor: &Actor) -> Result<Routine> {
    const OP: &str = "routine_create";
    log_op_start!(OP, actor_id = actor.id.as_str());
    let start = Instant::now();

    let store = SqliteStore::new(conn);
    let routine =
        routine_ops::create_routine(&store, name, actor).map_err(|e| fail(OP, start, e))?;

    log_op_end!(
        OP,
        duration_ms = elapsed_ms(start),
        routine_id = routine.id.as_str()
    );
    Ok(routine)
}

/// # Errors
///
/// - `InvalidInput`: blank actor
/// - `Internal`: database failure
pub fn routine_list(conn: &Connection, actor: &Actor) -> Result<Vec<Routine>> {
    const OP: &str = "routine_list";
    log_op_start!(OP, actor_id = actor.id.as_str());
    let start = Instant::now();
    ensure_known_actor(actor).map_err(|e| fail(OP, start, e))?;

    let store = SqliteStore::new(conn);
    let routines = routine_ops::get_routines(&store).map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), count = routines.len());
    Ok(routines)
}

/// # Errors
///
/// - `InvalidInput`: blank actor
/// - `NotFound`: no routine has this id
pub fn routine_get(conn: &Connection, routine_id: &str, actor: &Actor) -> Result<Routine> {
    const OP: &str = "routine_get";
    log_op_start!(OP, routine_id = routine_id, actor_id = actor.id.as_str());
    let start = Instant::now();
    ensure_known_actor(actor).map_err(|e| fail(OP, start, e))?;

    let store = SqliteStore::new(conn);
    let routine =
        routine_ops::get_routine_by_id(&store, routine_id).map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start));
    Ok(routine)
}

/// Append an exercise entry and return the refreshed routine
///
/// # Errors
///
/// - `NotFound`: routine or catalog exercise missing
/// - `Forbidden`: `actor` does not own the routine
/// - `InvalidInput`: entry values out of range
pub fn exercise_entry_add(
    conn: &Connection,
    routine_id: &str,
    entry: NewExerciseEntry,
    actor: &Actor,
) -> Result<Routine> {
    const OP: &str = "exercise_entry_add";
    log_op_start!(
        OP,
        routine_id = routine_id,
        exercise_id = entry.exercise_id.as_str()
    );
    let start = Instant::now();

    let store = SqliteStore::new(conn);
    let routine = routine_ops::add_exercise_entry(&store, &store, routine_id, entry, actor)
        .map_err(|e| fail(OP, start, e))?;

    log_op_end!(
        OP,
        duration_ms = elapsed_ms(start),
        entries = routine.exercises.len()
    );
    Ok(routine)
}

/// Patch the routine's entries for `exercise_id`
///
/// # Errors
///
/// - `NotFound`: routine missing or it has no entry for the exercise
/// - `Forbidden`: `actor` does not own the routine
/// - `InvalidInput`: empty patch or a supplied value out of range
pub fn exercise_entry_update(
    conn: &Connection,
    routine_id: &str,
    exercise_id: &str,
    patch: &EntryPatch,
    actor: &Actor,
) -> Result<Routine> {
    const OP: &str = "exercise_entry_update";
    log_op_start!(OP, routine_id = routine_id, exercise_id = exercise_id);
    let start = Instant::now();

    let store = SqliteStore::new(conn);
    let routine =
        routine_ops::update_exercise_entry(&store, routine_id, exercise_id, patch, actor)
            .map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start));
    Ok(routine)
}

/// Remove the routine's entries for `exercise_id`
///
/// # Errors
///
/// - `NotFound`: routine missing or it has no entry for the exercise
/// - `Forbidden`: `actor` does not own the routine
pub fn exercise_entry_remove(
    conn: &Connection,
    routine_id: &str,
    exercise_id: &str,
    actor: &Actor,
) -> Result<Routine> {
    const OP: &str = "exercise_entry_remove";
    log_op_start!(OP, routine_id = routine_id, exercise_id = exercise_id);
    let start = Instant::now();

    let store = SqliteStore::new(conn);
    let routine = routine_ops::remove_exercise_entry(&store, routine_id, exercise_id, actor)
        .map_err(|e| fail(OP, start, e))?;

    log_op_end!(
        OP,
        duration_ms = elapsed_ms(start),
        entries = routine.exercises.len()
    );
    Ok(routine)
}

/// # Errors
///
/// - `NotFound`: routine missing
/// - `Forbidden`: `actor` does not own the routine
/// - `InvalidInput`: blank name or same normalized name
/// - `Conflict`: another routine uses the name, or the write had no effect
pub fn routine_rename(
    conn: &Connection,
    routine_id: &str,
    new_name: &str,
    actor: &Actor,
) -> Result<Routine> {
    const OP: &str = "routine_rename";
    log_op_start!(OP, routine_id = routine_id);
    let start = Instant::now();

    let store = SqliteStore::new(conn);
    let routine = routine_ops::rename_routine(&store, routine_id, new_name, actor)
        .map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), name = routine.name.as_str());
    Ok(routine)
}

/// # Errors
///
/// - `NotFound`: routine missing
/// - `Forbidden`: `actor` does not own the routine
/// - `Conflict`: the delete had no effect
pub fn routine_delete(conn: &Connection, routine_id: &str, actor: &Actor) -> Result<()> {
    const OP: &str = "routine_delete";
    log_op_start!(OP, routine_id = routine_id);
    let start = Instant::now();

    let store = SqliteStore::new(conn);
    routine_ops::delete_routine(&store, routine_id, actor).map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start));
    Ok(())
}
