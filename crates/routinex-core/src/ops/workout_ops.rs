use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::{Result, RoutineXError};
use crate::model::{Actor, Workout};
use crate::policy::{ensure_known_actor, ensure_workout_owner};
use crate::ports::{RoutineStore, UserDirectory, WorkoutStore};

/// Log a completed session of `routine_id` for `actor`, finished now
///
/// # Errors
/// * `EmptyCreator` - If the actor id is blank
/// * `RoutineNotFound` - If the routine does not exist
pub fn post_workout(
    routines: &dyn RoutineStore,
    workouts: &dyn WorkoutStore,
    routine_id: &str,
    actor: &Actor,
) -> Result<Workout> {
    post_workout_at(routines, workouts, routine_id, actor, Utc::now())
}

/// Log a completed session with an explicit completion time
///
/// The routine's current name is copied onto the workout and never
/// refreshed afterwards.
///
/// # Errors
/// * `EmptyCreator` - If the actor id is blank
/// * `RoutineNotFound` - If the routine does not exist
pub fn post_workout_at(
    routines: &dyn RoutineStore,
    workouts: &dyn WorkoutStore,
    routine_id: &str,
    actor: &Actor,
    done_at: DateTime<Utc>,
) -> Result<Workout> {
    ensure_known_actor(actor)?;

    let routine =
        routines
            .find_by_id(routine_id)?
            .ok_or_else(|| RoutineXError::RoutineNotFound {
                routine_id: routine_id.to_string(),
            })?;

    let workout = Workout::new(
        Uuid::now_v7().to_string(),
        actor.id.clone(),
        routine.id,
        routine.name,
        done_at,
    );
    workouts.insert(&workout)?;

    tracing::debug!(workout_id = %workout.id, routine_id, "workout logged");
    Ok(workout)
}

/// Every workout of `user_id`, oldest first
///
/// # Errors
/// * `UserNotFound` - If the user is unknown
pub fn get_workouts(
    users: &dyn UserDirectory,
    workouts: &dyn WorkoutStore,
    user_id: &str,
) -> Result<Vec<Workout>> {
    if !users.user_exists(user_id)? {
        return Err(RoutineXError::UserNotFound {
            user_id: user_id.to_string(),
        });
    }

    let mut list = workouts.find_all_by_user(user_id)?;
    list.sort_by(|a, b| a.done_at.cmp(&b.done_at).then_with(|| a.id.cmp(&b.id)));
    Ok(list)
}

/// # Errors
/// * `WorkoutNotFound` - If no workout has this id
pub fn get_workout_by_id(workouts: &dyn WorkoutStore, workout_id: &str) -> Result<Workout> {
    workouts
        .find_by_id(workout_id)?
        .ok_or_else(|| RoutineXError::WorkoutNotFound {
            workout_id: workout_id.to_string(),
        })
}

/// Delete a workout logged by `actor`
///
/// # Errors
/// * `WorkoutNotFound` - If no workout has this id
/// * `NotWorkoutOwner` - If `actor` did not log it
/// * `NoEffect` - If the store deleted nothing after existence was confirmed
pub fn delete_workout(workouts: &dyn WorkoutStore, workout_id: &str, actor: &Actor) -> Result<()> {
    let workout = get_workout_by_id(workouts, workout_id)?;
    ensure_workout_owner(&workout, actor)?;

    if workouts.delete(workout_id)? == 0 {
        return Err(RoutineXError::NoEffect {
            op: "delete_workout",
            entity_id: workout_id.to_string(),
        });
    }

    tracing::debug!(workout_id, "workout deleted");
    Ok(())
}
