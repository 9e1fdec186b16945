//! Command inventory for every mutating operation
//!
//! Commands are processed by [`crate::apply::apply`], which routes each one
//! to its operation with an explicit acting identity.

use chrono::{DateTime, Utc};

use crate::model::{EntryPatch, NewExerciseEntry, Routine, Workout};

/// Mutating operations accepted by `apply()`
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a routine owned by the acting identity
    RoutineCreate { name: String },

    /// Append an exercise entry to a routine
    ExerciseEntryAdd {
        routine_id: String,
        entry: NewExerciseEntry,
    },

    /// Apply a partial update to a routine's entry for an exercise
    ExerciseEntryUpdate {
        routine_id: String,
        exercise_id: String,
        patch: EntryPatch,
    },

    /// Remove a routine's entry for an exercise
    ExerciseEntryRemove {
        routine_id: String,
        exercise_id: String,
    },

    RoutineRename {
        routine_id: String,
        new_name: String,
    },

    /// Hard-delete a routine
    RoutineDelete { routine_id: String },

    /// Log a workout; `done_at = None` means now
    WorkoutPost {
        routine_id: String,
        done_at: Option<DateTime<Utc>>,
    },

    WorkoutDelete { workout_id: String },
}

impl Command {
    /// Stable operation name, used as the `op` field in logs and errors
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::RoutineCreate { .. } => "routine_create",
            Command::ExerciseEntryAdd { .. } => "exercise_entry_add",
            Command::ExerciseEntryUpdate { .. } => "exercise_entry_update",
            Command::ExerciseEntryRemove { .. } => "exercise_entry_remove",
            Command::RoutineRename { .. } => "routine_rename",
            Command::RoutineDelete { .. } => "routine_delete",
            Command::WorkoutPost { .. } => "workout_post",
            Command::WorkoutDelete { .. } => "workout_delete",
        }
    }
}

/// What a successfully applied command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The refreshed routine after the mutation
    Routine(Routine),
    Workout(Workout),
    /// Id of the hard-deleted entity
    Deleted { id: String },
}
