//! Authorization rules
//!
//! One rule governs every routine mutation: the acting identity must be the
//! routine's creator. Creation and reads need only a known actor. The
//! global exercise ranking is the only role-gated read.

use crate::errors::{Result, RoutineXError};
use crate::model::{Actor, Routine, Workout};

/// Reject actors with a blank identity
///
/// # Errors
/// * `EmptyCreator` - If `actor.id` is empty or whitespace
pub fn ensure_known_actor(actor: &Actor) -> Result<()> {
    if actor.id.trim().is_empty() {
        return Err(RoutineXError::EmptyCreator);
    }
    Ok(())
}

/// Require `actor` to own `routine`
///
/// Role does not matter here: admins are not routine owners by default.
///
/// # Errors
/// * `NotRoutineOwner` - If the actor is not the creator
pub fn ensure_routine_owner(routine: &Routine, actor: &Actor) -> Result<()> {
    if !routine.is_owned_by(&actor.id) {
        return Err(RoutineXError::NotRoutineOwner {
            routine_id: routine.id.clone(),
            actor_id: actor.id.clone(),
        });
    }
    Ok(())
}

/// Require `actor` to own `workout`
///
/// # Errors
/// * `NotWorkoutOwner` - If the actor did not log the workout
pub fn ensure_workout_owner(workout: &Workout, actor: &Actor) -> Result<()> {
    if !workout.is_owned_by(&actor.id) {
        return Err(RoutineXError::NotWorkoutOwner {
            workout_id: workout.id.clone(),
            actor_id: actor.id.clone(),
        });
    }
    Ok(())
}

/// Require the admin role
///
/// # Errors
/// * `AdminRequired` - If the actor is a client
pub fn ensure_admin(actor: &Actor, op: &'static str) -> Result<()> {
    if !actor.is_admin() {
        return Err(RoutineXError::AdminRequired { op });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routine_of(owner: &str) -> Routine {
        Routine::new("r1".to_string(), "push".to_string(), owner.to_string())
    }

    #[test]
    fn test_owner_passes() {
        assert!(ensure_routine_owner(&routine_of("u1"), &Actor::client("u1")).is_ok());
    }

    #[test]
    fn test_admin_is_not_implicit_owner() {
        let err = ensure_routine_owner(&routine_of("u1"), &Actor::admin("root")).unwrap_err();
        assert!(matches!(err, RoutineXError::NotRoutineOwner { .. }));
    }

    #[test]
    fn test_blank_actor_rejected() {
        assert!(matches!(
            ensure_known_actor(&Actor::client("  ")),
            Err(RoutineXError::EmptyCreator)
        ));
    }

    #[test]
    fn test_ensure_admin() {
        assert!(ensure_admin(&Actor::admin("root"), "exercise_ranking").is_ok());
        assert!(matches!(
            ensure_admin(&Actor::client("u1"), "exercise_ranking"),
            Err(RoutineXError::AdminRequired { .. })
        ));
    }
}
