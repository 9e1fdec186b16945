//! Workout Analytics Engine handlers

use std::time::Instant;

use routinex_core::analytics::{get_exercise_ranking, get_workout_stats};
use routinex_core::model::{Actor, ExerciseUsage, WorkoutStats};
use routinex_core::policy::ensure_known_actor;
use routinex_core::{log_op_end, log_op_start};
use routinex_store::errors::Result;
use routinex_store::SqliteStore;
use rusqlite::Connection;

use super::{elapsed_ms, fail};

/// Statistics over the full workout history of `user_id`
///
/// # Errors
///
/// - `InvalidInput`: blank actor
/// - `NotFound`: unknown user
pub fn workout_stats(conn: &Connection, user_id: &str, actor: &Actor) -> Result<WorkoutStats> {
    const OP: &str = "workout_stats";
    log_op_start!(OP, user_id = user_id, actor_id = actor.id.as_str());
    let start = Instant::now();
    ensure_known_actor(actor).map_err(|e| fail(OP, start, e))?;

    let store = SqliteStore::new(conn);
    let stats = get_workout_stats(&store, &store, user_id).map_err(|e| fail(OP, start, e))?;

    log_op_end!(
        OP,
        duration_ms = elapsed_ms(start),
        total_workouts = stats.total_workouts
    );
    Ok(stats)
}

/// Global exercise usage ranking
///
/// # Errors
///
/// - `Forbidden`: `actor` is not an admin
pub fn exercise_ranking(conn: &Connection, actor: &Actor) -> Result<Vec<ExerciseUsage>> {
    const OP: &str = "exercise_ranking";
    log_op_start!(OP, actor_id = actor.id.as_str());
    let start = Instant::now();

    let store = SqliteStore::new(conn);
    let ranking = get_exercise_ranking(&store, &store, actor).map_err(|e| fail(OP, start, e))?;

    log_op_end!(OP, duration_ms = elapsed_ms(start), count = ranking.len());
    Ok(ranking)
}
