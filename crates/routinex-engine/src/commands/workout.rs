//! Workout handlers

use std::time::Instant;

use chrono::{DateTime, Utc};
use routinex_core::model::{Actor, Workout};
use routinex_core::ops::workout_ops;
use routinex_core::policy::ensure_known_actor;
use routinex_core::{log_op_end, log_op_start};
use routinex_store::errors::Result;
use routinex_store::SqliteStore;
use rusqlite::Connection;

use super::{elapsed_ms, fail};

/// Log a workout of `routine_id` for `actor`, finished at `done_at` or now
///
/// # Errors
///
/// - `NotFound`: routine missing
/// - `InvalidInput`: blank actor
pub fn workout_post(
    conn: &Connection,
    routine_id: &str,
    done_at: Option<DateTime<Utc>>,
    actor: &Actor,
) -> Result<Workout> {
    const OP: &str = "workout_post";
    log_op_start!(OP, routine_id = routine_id, actor_id = actor.id.as_str());
    let start = Instant::now();

    let store = SqliteStore::new(conn);
    let done_at = done_at.unwrap_or_else(Utc::now);
    let workout = workout_ops::post_workout_at(&store, &store, routine_id, actor, done_at)
        .map_err(|e| fail(OP, start, e))?;

    log_op_end!(
        OP,
        duration_ms = elapsed_ms(start),
        workout_id = workout.id.as_str()
    );
    Ok(workout)
}

/// # Errors
///
/// - `InvalidInput`: blank actor
/// - `NotFound`: unknown user
pub fn workout_list(conn: &Connection, user_id: &str, actor: &Actor) -> Result<Vec<Workout>> {
    const OP: &str = "workout_list";
    log_op_start!(OP, user_id = user_id, actor_id = actor.id.as_str());
    let start = Instant::now();
    ensure_known_actor(actor).map_err(|e| fail(OP, start, e))?;

    let store = SqliteStore::new(conn);
    let workouts =
        workout_ops::get_workouts(&store, &store, user_id).map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), count = workouts.len());
    Ok(workouts)
}

/// # Errors
///
/// - `InvalidInput`: blank actor
/// - `NotFound`: no workout has this id
pub fn workout_get(conn: &Connection, workout_id: &str, actor: &Actor) -> Result<Workout> {
    const OP: &str = "workout_get";
    log_op_start!(OP, workout_id = workout_id, actor_id = actor.id.as_str());
    let start = Instant::now();
    ensure_known_actor(actor).map_err(|e| fail(OP, start, e))?;

    let store = SqliteStore::new(conn);
    let workout =
        workout_ops::get_workout_by_id(&store, workout_id).map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start));
    Ok(workout)
}

/// # Errors
///
/// - `NotFound`: no workout has this id
/// - `Forbidden`: `actor` did not log it
/// - `Conflict`: the delete had no effect
pub fn workout_delete(conn: &Connection, workout_id: &str, actor: &Actor) -> Result<()> {
    const OP: &str = "workout_delete";
    log_op_start!(OP, workout_id = workout_id);
    let start = Instant::now();

    let store = SqliteStore::new(conn);
    workout_ops::delete_workout(&store, workout_id, actor).map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start));
    Ok(())
}
