//! Single entry point for mutating commands
//!
//! ```
//! use routinex_core::{apply, Actor, Collaborators, Command, CommandOutcome, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let ports = Collaborators::from_store(&store);
//! let cmd = Command::RoutineCreate { name: "Leg Day".to_string() };
//!
//! let outcome = apply(ports, cmd, &Actor::client("user-1")).unwrap();
//! assert!(matches!(outcome, CommandOutcome::Routine(r) if r.name == "leg day"));
//! ```

use crate::commands::{Command, CommandOutcome};
use crate::errors::Result;
use crate::model::Actor;
use crate::ops::{routine_ops, workout_ops};
use crate::ports::Collaborators;

/// Route `cmd` to its operation on behalf of `actor`
///
/// Validation and authorization happen inside the operation; a failed
/// command leaves the stores untouched except where an operation documents
/// a separate second write (the edition stamp).
///
/// # Errors
///
/// Whatever the routed operation returns; see `RoutineXError`.
pub fn apply(ports: Collaborators<'_>, cmd: Command, actor: &Actor) -> Result<CommandOutcome> {
    match cmd {
        Command::RoutineCreate { name } => {
            routine_ops::create_routine(ports.routines, &name, actor).map(CommandOutcome::Routine)
        }

        Command::ExerciseEntryAdd { routine_id, entry } => {
            routine_ops::add_exercise_entry(ports.routines, ports.catalog, &routine_id, entry, actor)
                .map(CommandOutcome::Routine)
        }

        Command::ExerciseEntryUpdate {
            routine_id,
            exercise_id,
            patch,
        } => routine_ops::update_exercise_entry(
            ports.routines,
            &routine_id,
            &exercise_id,
            &patch,
            actor,
        )
        .map(CommandOutcome::Routine),

        Command::ExerciseEntryRemove {
            routine_id,
            exercise_id,
        } => routine_ops::remove_exercise_entry(ports.routines, &routine_id, &exercise_id, actor)
            .map(CommandOutcome::Routine),

        Command::RoutineRename {
            routine_id,
            new_name,
        } => routine_ops::rename_routine(ports.routines, &routine_id, &new_name, actor)
            .map(CommandOutcome::Routine),

        Command::RoutineDelete { routine_id } => {
            routine_ops::delete_routine(ports.routines, &routine_id, actor)?;
            Ok(CommandOutcome::Deleted { id: routine_id })
        }

        Command::WorkoutPost {
            routine_id,
            done_at,
        } => {
            let workout = match done_at {
                Some(at) => workout_ops::post_workout_at(
                    ports.routines,
                    ports.workouts,
                    &routine_id,
                    actor,
                    at,
                )?,
                None => {
                    workout_ops::post_workout(ports.routines, ports.workouts, &routine_id, actor)?
                }
            };
            Ok(CommandOutcome::Workout(workout))
        }

        Command::WorkoutDelete { workout_id } => {
            workout_ops::delete_workout(ports.workouts, &workout_id, actor)?;
            Ok(CommandOutcome::Deleted { id: workout_id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::model::{EntryPatch, NewExerciseEntry};
    use crate::ops::MemoryStore;

    fn created_routine_id(outcome: CommandOutcome) -> String {
        match outcome {
            CommandOutcome::Routine(r) => r.id,
            other => panic!("expected routine, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_full_routine_lifecycle() {
        let store = MemoryStore::new();
        store.register_exercise("E1", "Squat").unwrap();
        let ports = Collaborators::from_store(&store);
        let owner = Actor::client("userA");

        let routine_id = created_routine_id(
            apply(
                ports,
                Command::RoutineCreate {
                    name: "Leg Day".to_string(),
                },
                &owner,
            )
            .unwrap(),
        );

        apply(
            ports,
            Command::ExerciseEntryAdd {
                routine_id: routine_id.clone(),
                entry: NewExerciseEntry::new("E1", 10, 3, 20.0),
            },
            &owner,
        )
        .unwrap();

        let outcome = apply(
            ports,
            Command::ExerciseEntryUpdate {
                routine_id: routine_id.clone(),
                exercise_id: "E1".to_string(),
                patch: EntryPatch::default().with_weight(25.0),
            },
            &owner,
        )
        .unwrap();
        match outcome {
            CommandOutcome::Routine(r) => assert_eq!(r.exercises[0].weight, 25.0),
            other => panic!("expected routine, got {:?}", other),
        }

        let outcome = apply(
            ports,
            Command::RoutineDelete {
                routine_id: routine_id.clone(),
            },
            &owner,
        )
        .unwrap();
        assert_eq!(outcome, CommandOutcome::Deleted { id: routine_id });
    }

    #[test]
    fn test_apply_rejects_non_owner() {
        let store = MemoryStore::new();
        let ports = Collaborators::from_store(&store);
        let routine_id = created_routine_id(
            apply(
                ports,
                Command::RoutineCreate {
                    name: "Push".to_string(),
                },
                &Actor::client("userA"),
            )
            .unwrap(),
        );

        let err = apply(
            ports,
            Command::RoutineRename {
                routine_id,
                new_name: "Pull".to_string(),
            },
            &Actor::client("userB"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Forbidden);
    }

    #[test]
    fn test_op_names_are_distinct() {
        let a = Command::RoutineDelete {
            routine_id: "r".to_string(),
        };
        let b = Command::WorkoutDelete {
            workout_id: "w".to_string(),
        };
        assert_ne!(a.op_name(), b.op_name());
    }
}
