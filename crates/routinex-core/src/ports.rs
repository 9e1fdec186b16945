//! Collaborator traits the core consumes
//!
//! The core never talks to a database directly. Every read and write goes
//! through these traits, implemented in-memory by [`crate::ops::MemoryStore`]
//! and on SQLite by the `routinex-store` crate.
//!
//! All methods return [`StoreResult`]; implementations classify their own
//! failures as `Internal`.

use chrono::{DateTime, Utc};

use crate::errors::ExError;
use crate::model::{EntryPatch, ExerciseEntry, Routine, Workout};

/// Result type for collaborator calls
pub type StoreResult<T> = std::result::Result<T, ExError>;

/// Effect of a sub-entry mutation
///
/// `matched` counts routines matched by id (0 or 1). `modified` counts the
/// entries the statement addressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Exercise catalog lookup
pub trait ExerciseCatalog {
    /// Resolve an exercise id to its name; `None` if it does not exist
    fn exists_and_name(&self, exercise_id: &str) -> StoreResult<Option<String>>;
}

/// Known-user lookup
pub trait UserDirectory {
    fn user_exists(&self, user_id: &str) -> StoreResult<bool>;
}

/// Persistence for routines and their embedded entries
pub trait RoutineStore {
    /// Insert a new routine; returns its id
    fn insert(&self, routine: &Routine) -> StoreResult<String>;

    fn find_by_id(&self, routine_id: &str) -> StoreResult<Option<Routine>>;

    /// All routines ordered by creation time, then id
    fn find_all(&self) -> StoreResult<Vec<Routine>>;

    /// Targeted existence query on the normalized name
    fn exists_by_normalized_name(&self, name: &str) -> StoreResult<bool>;

    /// Overwrite the routine's own fields; returns modified count
    ///
    /// The entry list is owned by the atomic entry calls and is left as
    /// stored, so an append that lands between a read and this write
    /// survives it.
    fn replace_whole_document(&self, routine: &Routine) -> StoreResult<u64>;

    /// Atomically append one entry; returns matched routine count
    fn append_entry(&self, routine_id: &str, entry: &ExerciseEntry) -> StoreResult<u64>;

    /// Atomically set the supplied fields on the entries for `exercise_id`
    fn update_entry_fields(
        &self,
        routine_id: &str,
        exercise_id: &str,
        patch: &EntryPatch,
    ) -> StoreResult<MutationOutcome>;

    /// Atomically remove the entries for `exercise_id`
    fn remove_entry(&self, routine_id: &str, exercise_id: &str) -> StoreResult<MutationOutcome>;

    /// Set the edition timestamp without touching the entry list
    fn stamp_edition(&self, routine_id: &str, at: DateTime<Utc>) -> StoreResult<u64>;

    /// Hard delete; returns deleted count
    fn delete(&self, routine_id: &str) -> StoreResult<u64>;
}

/// Persistence for workout records
pub trait WorkoutStore {
    fn insert(&self, workout: &Workout) -> StoreResult<String>;

    fn find_by_id(&self, workout_id: &str) -> StoreResult<Option<Workout>>;

    /// Every workout logged by `user_id`, in no particular order
    fn find_all_by_user(&self, user_id: &str) -> StoreResult<Vec<Workout>>;

    fn delete(&self, workout_id: &str) -> StoreResult<u64>;
}

/// Borrowed bundle of every collaborator, for command dispatch
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub routines: &'a dyn RoutineStore,
    pub workouts: &'a dyn WorkoutStore,
    pub catalog: &'a dyn ExerciseCatalog,
    pub users: &'a dyn UserDirectory,
}

impl<'a> Collaborators<'a> {
    /// Borrow all four collaborators from one backing store
    pub fn from_store<S>(store: &'a S) -> Self
    where
        S: RoutineStore + WorkoutStore + ExerciseCatalog + UserDirectory,
    {
        Self {
            routines: store,
            workouts: store,
            catalog: store,
            users: store,
        }
    }
}
