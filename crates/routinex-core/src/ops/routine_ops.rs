//! Routine Composition Manager
//!
//! Naming rules, ownership gating, and the mutation protocol for a routine's
//! embedded exercise list. Every mutating operation runs its checks in a
//! fixed order: load routine, ownership, existence of referenced data,
//! value validation, then the write.
//!
//! Entry mutations are single targeted store calls (`append_entry`,
//! `update_entry_fields`, `remove_entry`), never a read-modify-write of the
//! list. The edition timestamp is stamped by a second, separate write.

use chrono::Utc;
use uuid::Uuid;

use crate::errors::{ExError, ExErrorKind, Result, RoutineXError};
use crate::model::{Actor, EntryPatch, ExerciseEntry, NewExerciseEntry, Routine};
use crate::policy::{ensure_known_actor, ensure_routine_owner};
use crate::ports::{ExerciseCatalog, RoutineStore};
use crate::rules::{validate_new_entry, validate_patch, validated_routine_name};

/// Create a routine owned by `actor`
///
/// The name is trimmed and lowercased before the uniqueness check and
/// before it is stored.
///
/// # Errors
/// * `EmptyCreator` - If the actor id is blank
/// * `EmptyRoutineName` - If the name is blank after trimming
/// * `DuplicateRoutineName` - If a routine already uses the normalized name
pub fn create_routine(routines: &dyn RoutineStore, name: &str, actor: &Actor) -> Result<Routine> {
    ensure_known_actor(actor)?;
    let name = validated_routine_name(name)?;

    if routines.exists_by_normalized_name(&name)? {
        return Err(RoutineXError::DuplicateRoutineName { name });
    }

    let routine = Routine::new(Uuid::now_v7().to_string(), name, actor.id.clone());
    routines
        .insert(&routine)
        .map_err(|err| name_taken_or_store(err, &routine.name))?;

    tracing::debug!(routine_id = %routine.id, name = %routine.name, "routine created");
    Ok(routine)
}

/// List every routine, oldest first
pub fn get_routines(routines: &dyn RoutineStore) -> Result<Vec<Routine>> {
    Ok(routines.find_all()?)
}

/// Read one routine
///
/// # Errors
/// * `RoutineNotFound` - If no routine has this id
pub fn get_routine_by_id(routines: &dyn RoutineStore, routine_id: &str) -> Result<Routine> {
    routines
        .find_by_id(routine_id)?
        .ok_or_else(|| RoutineXError::RoutineNotFound {
            routine_id: routine_id.to_string(),
        })
}

/// A name check can lose a race with a concurrent writer; the store's
/// uniqueness constraint then reports Conflict.
fn name_taken_or_store(err: ExError, name: &str) -> RoutineXError {
    if err.kind() == ExErrorKind::Conflict {
        RoutineXError::DuplicateRoutineName {
            name: name.to_string(),
        }
    } else {
        RoutineXError::Store(err)
    }
}

/// Load a routine and check that `actor` owns it
fn load_owned(routines: &dyn RoutineStore, routine_id: &str, actor: &Actor) -> Result<Routine> {
    let routine = get_routine_by_id(routines, routine_id)?;
    ensure_routine_owner(&routine, actor)?;
    Ok(routine)
}

fn stamp_and_reload(routines: &dyn RoutineStore, routine_id: &str) -> Result<Routine> {
    routines.stamp_edition(routine_id, Utc::now())?;
    get_routine_by_id(routines, routine_id)
}

/// Append an exercise entry to a routine
///
/// No de-duplication: adding the same exercise twice yields two entries.
///
/// # Errors
/// * `RoutineNotFound` - If the routine does not exist
/// * `NotRoutineOwner` - If `actor` is not the creator
/// * `ExerciseNotFound` - If the exercise is not in the catalog
/// * `InvalidEntryField` - If repetitions/series are 0 or weight is negative
pub fn add_exercise_entry(
    routines: &dyn RoutineStore,
    catalog: &dyn ExerciseCatalog,
    routine_id: &str,
    entry: NewExerciseEntry,
    actor: &Actor,
) -> Result<Routine> {
    load_owned(routines, routine_id, actor)?;

    if catalog.exists_and_name(&entry.exercise_id)?.is_none() {
        return Err(RoutineXError::ExerciseNotFound {
            exercise_id: entry.exercise_id,
        });
    }

    validate_new_entry(&entry)?;

    let entry = ExerciseEntry::from_new(entry);
    let matched = routines.append_entry(routine_id, &entry)?;
    if matched == 0 {
        // Deleted between the ownership check and the append
        return Err(RoutineXError::RoutineNotFound {
            routine_id: routine_id.to_string(),
        });
    }

    tracing::debug!(routine_id, exercise_id = %entry.exercise_id, "exercise entry appended");
    stamp_and_reload(routines, routine_id)
}

/// Apply the supplied fields of `patch` to the routine's entry for `exercise_id`
///
/// Fields left as `None` keep their stored value.
///
/// # Errors
/// * `RoutineNotFound` - If the routine does not exist
/// * `NotRoutineOwner` - If `actor` is not the creator
/// * `EmptyEntryPatch` - If the patch supplies no field
/// * `InvalidEntryField` - If a supplied field is out of range
/// * `EntryNotInRoutine` - If the routine has no entry for `exercise_id`
pub fn update_exercise_entry(
    routines: &dyn RoutineStore,
    routine_id: &str,
    exercise_id: &str,
    patch: &EntryPatch,
    actor: &Actor,
) -> Result<Routine> {
    let routine = load_owned(routines, routine_id, actor)?;
    validate_patch(exercise_id, patch)?;

    if !routine.has_exercise(exercise_id) {
        return Err(RoutineXError::EntryNotInRoutine {
            routine_id: routine_id.to_string(),
            exercise_id: exercise_id.to_string(),
        });
    }

    let outcome = routines.update_entry_fields(routine_id, exercise_id, patch)?;
    if outcome.matched == 0 {
        return Err(RoutineXError::RoutineNotFound {
            routine_id: routine_id.to_string(),
        });
    }
    if outcome.modified == 0 {
        // Removed concurrently after the presence check
        return Err(RoutineXError::EntryNotInRoutine {
            routine_id: routine_id.to_string(),
            exercise_id: exercise_id.to_string(),
        });
    }

    tracing::debug!(
        routine_id,
        exercise_id,
        entries = outcome.modified,
        "exercise entry updated"
    );
    stamp_and_reload(routines, routine_id)
}

/// Remove the routine's entry for `exercise_id`
///
/// # Errors
/// * `RoutineNotFound` - If the routine does not exist
/// * `NotRoutineOwner` - If `actor` is not the creator
/// * `EntryNotInRoutine` - If the routine has no entry for `exercise_id`
pub fn remove_exercise_entry(
    routines: &dyn RoutineStore,
    routine_id: &str,
    exercise_id: &str,
    actor: &Actor,
) -> Result<Routine> {
    let routine = load_owned(routines, routine_id, actor)?;

    if !routine.has_exercise(exercise_id) {
        return Err(RoutineXError::EntryNotInRoutine {
            routine_id: routine_id.to_string(),
            exercise_id: exercise_id.to_string(),
        });
    }

    let outcome = routines.remove_entry(routine_id, exercise_id)?;
    if outcome.matched == 0 {
        return Err(RoutineXError::RoutineNotFound {
            routine_id: routine_id.to_string(),
        });
    }
    if outcome.modified == 0 {
        return Err(RoutineXError::EntryNotInRoutine {
            routine_id: routine_id.to_string(),
            exercise_id: exercise_id.to_string(),
        });
    }

    tracing::debug!(routine_id, exercise_id, "exercise entry removed");
    stamp_and_reload(routines, routine_id)
}

/// Rename a routine
///
/// # Errors
/// * `RoutineNotFound` - If the routine does not exist
/// * `NotRoutineOwner` - If `actor` is not the creator
/// * `EmptyRoutineName` - If the new name is blank after trimming
/// * `RenameToSameName` - If the normalized new name equals the current one
/// * `DuplicateRoutineName` - If another routine already uses the new name
/// * `NoEffect` - If the store replaced nothing
pub fn rename_routine(
    routines: &dyn RoutineStore,
    routine_id: &str,
    new_name: &str,
    actor: &Actor,
) -> Result<Routine> {
    let mut routine = load_owned(routines, routine_id, actor)?;
    let new_name = validated_routine_name(new_name)?;

    if new_name == routine.name {
        return Err(RoutineXError::RenameToSameName {
            routine_id: routine_id.to_string(),
        });
    }
    if routines.exists_by_normalized_name(&new_name)? {
        return Err(RoutineXError::DuplicateRoutineName { name: new_name });
    }

    routine.name = new_name;
    routine.edited_at = Utc::now();

    let replaced = routines
        .replace_whole_document(&routine)
        .map_err(|err| name_taken_or_store(err, &routine.name))?;
    if replaced == 0 {
        return Err(RoutineXError::NoEffect {
            op: "rename_routine",
            entity_id: routine_id.to_string(),
        });
    }

    tracing::debug!(routine_id, name = %routine.name, "routine renamed");
    get_routine_by_id(routines, routine_id)
}

/// Hard-delete a routine
///
/// Workouts that reference it keep their name snapshot.
///
/// # Errors
/// * `RoutineNotFound` - If the routine does not exist
/// * `NotRoutineOwner` - If `actor` is not the creator
/// * `NoEffect` - If the store deleted nothing after existence was confirmed
pub fn delete_routine(routines: &dyn RoutineStore, routine_id: &str, actor: &Actor) -> Result<()> {
    load_owned(routines, routine_id, actor)?;

    if routines.delete(routine_id)? == 0 {
        return Err(RoutineXError::NoEffect {
            op: "delete_routine",
            entity_id: routine_id.to_string(),
        });
    }

    tracing::debug!(routine_id, "routine deleted");
    Ok(())
}
