use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::errors::{ExError, ExErrorKind};
use crate::model::{EntryPatch, ExerciseEntry, Routine, Workout};
use crate::ports::{
    ExerciseCatalog, MutationOutcome, RoutineStore, StoreResult, UserDirectory, WorkoutStore,
};

#[derive(Debug, Default)]
struct Tables {
    routines: HashMap<String, Routine>,
    workouts: HashMap<String, Workout>,
    exercises: HashMap<String, String>,
    users: HashSet<String>,
}

/// In-memory implementation of every collaborator
///
/// HashMap tables behind one `RwLock`. Each trait method takes the lock once,
/// so every sub-entry mutation is applied to the routine as a single step
/// and concurrent appends are never lost.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

fn poisoned(op: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op.to_string())
        .with_message("in-memory store lock poisoned")
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, op: &str) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| poisoned(op))
    }

    fn write(&self, op: &str) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| poisoned(op))
    }

    /// Add an exercise to the catalog fixture
    pub fn register_exercise(&self, exercise_id: &str, name: &str) -> StoreResult<()> {
        self.write("register_exercise")?
            .exercises
            .insert(exercise_id.to_string(), name.to_string());
        Ok(())
    }

    /// Add a user id to the directory fixture
    pub fn register_user(&self, user_id: &str) -> StoreResult<()> {
        self.write("register_user")?
            .users
            .insert(user_id.to_string());
        Ok(())
    }

    pub fn routine_count(&self) -> StoreResult<usize> {
        Ok(self.read("routine_count")?.routines.len())
    }

    pub fn workout_count(&self) -> StoreResult<usize> {
        Ok(self.read("workout_count")?.workouts.len())
    }
}

impl ExerciseCatalog for MemoryStore {
    fn exists_and_name(&self, exercise_id: &str) -> StoreResult<Option<String>> {
        Ok(self
            .read("exercise_lookup")?
            .exercises
            .get(exercise_id)
            .cloned())
    }
}

impl UserDirectory for MemoryStore {
    fn user_exists(&self, user_id: &str) -> StoreResult<bool> {
        Ok(self.read("user_lookup")?.users.contains(user_id))
    }
}

impl RoutineStore for MemoryStore {
    fn insert(&self, routine: &Routine) -> StoreResult<String> {
        let mut tables = self.write("routine_insert")?;
        // Mirrors the UNIQUE(name) constraint of the SQL schema
        if tables.routines.values().any(|r| r.name == routine.name) {
            return Err(ExError::new(ExErrorKind::Conflict)
                .with_op("routine_insert")
                .with_entity_id(routine.name.clone())
                .with_message("routine name already taken"));
        }
        tables
            .routines
            .insert(routine.id.clone(), routine.clone());
        Ok(routine.id.clone())
    }

    fn find_by_id(&self, routine_id: &str) -> StoreResult<Option<Routine>> {
        Ok(self
            .read("routine_find")?
            .routines
            .get(routine_id)
            .cloned())
    }

    fn find_all(&self) -> StoreResult<Vec<Routine>> {
        let mut all: Vec<Routine> = self
            .read("routine_find_all")?
            .routines
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    fn exists_by_normalized_name(&self, name: &str) -> StoreResult<bool> {
        Ok(self
            .read("routine_name_exists")?
            .routines
            .values()
            .any(|r| r.name == name))
    }

    fn replace_whole_document(&self, routine: &Routine) -> StoreResult<u64> {
        let mut tables = self.write("routine_replace")?;
        match tables.routines.get_mut(&routine.id) {
            Some(stored) => {
                let exercises = std::mem::take(&mut stored.exercises);
                *stored = Routine {
                    exercises,
                    ..routine.clone()
                };
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn append_entry(&self, routine_id: &str, entry: &ExerciseEntry) -> StoreResult<u64> {
        let mut tables = self.write("routine_append_entry")?;
        match tables.routines.get_mut(routine_id) {
            Some(routine) => {
                routine.exercises.push(entry.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn update_entry_fields(
        &self,
        routine_id: &str,
        exercise_id: &str,
        patch: &EntryPatch,
    ) -> StoreResult<MutationOutcome> {
        let mut tables = self.write("routine_update_entry")?;
        let Some(routine) = tables.routines.get_mut(routine_id) else {
            return Ok(MutationOutcome::default());
        };

        let mut modified = 0;
        for entry in routine
            .exercises
            .iter_mut()
            .filter(|e| e.exercise_id == exercise_id)
        {
            entry.apply_patch(patch);
            modified += 1;
        }

        Ok(MutationOutcome {
            matched: 1,
            modified,
        })
    }

    fn remove_entry(&self, routine_id: &str, exercise_id: &str) -> StoreResult<MutationOutcome> {
        let mut tables = self.write("routine_remove_entry")?;
        let Some(routine) = tables.routines.get_mut(routine_id) else {
            return Ok(MutationOutcome::default());
        };

        let before = routine.exercises.len();
        routine.exercises.retain(|e| e.exercise_id != exercise_id);

        Ok(MutationOutcome {
            matched: 1,
            modified: (before - routine.exercises.len()) as u64,
        })
    }

    fn stamp_edition(&self, routine_id: &str, at: DateTime<Utc>) -> StoreResult<u64> {
        let mut tables = self.write("routine_stamp_edition")?;
        match tables.routines.get_mut(routine_id) {
            Some(routine) => {
                routine.edited_at = at;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete(&self, routine_id: &str) -> StoreResult<u64> {
        let removed = self
            .write("routine_delete")?
            .routines
            .remove(routine_id)
            .is_some();
        Ok(u64::from(removed))
    }
}

impl WorkoutStore for MemoryStore {
    fn insert(&self, workout: &Workout) -> StoreResult<String> {
        self.write("workout_insert")?
            .workouts
            .insert(workout.id.clone(), workout.clone());
        Ok(workout.id.clone())
    }

    fn find_by_id(&self, workout_id: &str) -> StoreResult<Option<Workout>> {
        Ok(self
            .read("workout_find")?
            .workouts
            .get(workout_id)
            .cloned())
    }

    fn find_all_by_user(&self, user_id: &str) -> StoreResult<Vec<Workout>> {
        Ok(self
            .read("workout_find_by_user")?
            .workouts
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    fn delete(&self, workout_id: &str) -> StoreResult<u64> {
        let removed = self
            .write("workout_delete")?
            .workouts
            .remove(workout_id)
            .is_some();
        Ok(u64::from(removed))
    }
}
