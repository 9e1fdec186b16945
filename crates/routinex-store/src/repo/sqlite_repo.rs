//! SQLite repository
//!
//! Routines live in `routines`, their entries in `routine_exercises` keyed
//! by `(routine_id, position)`. Append, update and remove of entries are
//! single statements, so concurrent writers never lose each other's work.
//! Replacing a routine rewrites its row only.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use routinex_core::model::{EntryPatch, ExerciseEntry, Routine, Workout};
use routinex_core::ports::{
    ExerciseCatalog, MutationOutcome, RoutineStore, StoreResult, UserDirectory, WorkoutStore,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::errors::{corrupt_timestamp, from_rusqlite, from_rusqlite_unique, Result};

/// Every collaborator backed by one borrowed connection
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn from_millis(op: &str, value: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(value).ok_or_else(|| corrupt_timestamp(op, value))
}

fn from_millis_opt(op: &str, value: Option<i64>) -> Result<Option<DateTime<Utc>>> {
    value.map(|v| from_millis(op, v)).transpose()
}

struct RoutineRow {
    id: String,
    name: String,
    creator_user_id: String,
    created_at: i64,
    edited_at: i64,
    elimination_date: Option<i64>,
}

impl RoutineRow {
    const COLUMNS: &'static str =
        "id, name, creator_user_id, created_at, edited_at, elimination_date";

    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            creator_user_id: row.get(2)?,
            created_at: row.get(3)?,
            edited_at: row.get(4)?,
            elimination_date: row.get(5)?,
        })
    }

    fn into_routine(self, op: &str, exercises: Vec<ExerciseEntry>) -> Result<Routine> {
        Ok(Routine {
            id: self.id,
            name: self.name,
            creator_user_id: self.creator_user_id,
            exercises,
            created_at: from_millis(op, self.created_at)?,
            edited_at: from_millis(op, self.edited_at)?,
            elimination_date: from_millis_opt(op, self.elimination_date)?,
        })
    }
}

struct EntryRow {
    routine_id: String,
    exercise_id: String,
    repetitions: u32,
    series: u32,
    weight: f64,
    created_at: i64,
    elimination_date: Option<i64>,
}

impl EntryRow {
    const COLUMNS: &'static str =
        "routine_id, exercise_id, repetitions, series, weight, created_at, elimination_date";

    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            routine_id: row.get(0)?,
            exercise_id: row.get(1)?,
            repetitions: row.get(2)?,
            series: row.get(3)?,
            weight: row.get(4)?,
            created_at: row.get(5)?,
            elimination_date: row.get(6)?,
        })
    }

    fn into_entry(self, op: &str) -> Result<(String, ExerciseEntry)> {
        let entry = ExerciseEntry {
            exercise_id: self.exercise_id,
            repetitions: self.repetitions,
            series: self.series,
            weight: self.weight,
            created_at: from_millis(op, self.created_at)?,
            elimination_date: from_millis_opt(op, self.elimination_date)?,
        };
        Ok((self.routine_id, entry))
    }
}

struct WorkoutRow {
    id: String,
    user_id: String,
    routine_id: String,
    routine_name: String,
    done_at: i64,
}

impl WorkoutRow {
    const COLUMNS: &'static str = "id, user_id, routine_id, routine_name, done_at";

    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            routine_id: row.get(2)?,
            routine_name: row.get(3)?,
            done_at: row.get(4)?,
        })
    }

    fn into_workout(self, op: &str) -> Result<Workout> {
        Ok(Workout {
            id: self.id,
            user_id: self.user_id,
            routine_id: self.routine_id,
            routine_name: self.routine_name,
            done_at: from_millis(op, self.done_at)?,
        })
    }
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Add or rename an exercise in the catalog table
    pub fn register_exercise(&self, exercise_id: &str, name: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO exercises (id, name) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
                params![exercise_id, name],
            )
            .map_err(|e| from_rusqlite("register_exercise", e))?;
        Ok(())
    }

    pub fn register_user(&self, user_id: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO users (id) VALUES (?1)",
                params![user_id],
            )
            .map_err(|e| from_rusqlite("register_user", e))?;
        Ok(())
    }

    fn entries_of(&self, routine_id: &str) -> Result<Vec<ExerciseEntry>> {
        const OP: &str = "routine_entries";
        let sql = format!(
            "SELECT {} FROM routine_exercises WHERE routine_id = ?1 ORDER BY position",
            EntryRow::COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql).map_err(|e| from_rusqlite(OP, e))?;
        let rows = stmt
            .query_map([routine_id], EntryRow::read)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| from_rusqlite(OP, e))?;

        rows.into_iter()
            .map(|row| row.into_entry(OP).map(|(_, entry)| entry))
            .collect()
    }

    fn insert_entry_at(
        conn: &Connection,
        routine_id: &str,
        position: usize,
        entry: &ExerciseEntry,
    ) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO routine_exercises
                (routine_id, position, exercise_id, repetitions, series, weight, created_at, elimination_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                routine_id,
                position as i64,
                entry.exercise_id,
                entry.repetitions,
                entry.series,
                entry.weight,
                to_millis(entry.created_at),
                entry.elimination_date.map(to_millis),
            ],
        )
    }

    fn routine_exists(&self, op: &str, routine_id: &str) -> Result<bool> {
        self.conn
            .query_row(
                "SELECT 1 FROM routines WHERE id = ?1",
                [routine_id],
                |_| Ok(()),
            )
            .optional()
            .map(|found| found.is_some())
            .map_err(|e| from_rusqlite(op, e))
    }
}

impl ExerciseCatalog for SqliteStore<'_> {
    fn exists_and_name(&self, exercise_id: &str) -> StoreResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT name FROM exercises WHERE id = ?1",
                [exercise_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| from_rusqlite("exercise_lookup", e))
    }
}

impl UserDirectory for SqliteStore<'_> {
    fn user_exists(&self, user_id: &str) -> StoreResult<bool> {
        self.conn
            .query_row("SELECT 1 FROM users WHERE id = ?1", [user_id], |_| Ok(()))
            .optional()
            .map(|found| found.is_some())
            .map_err(|e| from_rusqlite("user_lookup", e))
    }
}

impl RoutineStore for SqliteStore<'_> {
    fn insert(&self, routine: &Routine) -> StoreResult<String> {
        const OP: &str = "routine_insert";
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| from_rusqlite(OP, e))?;

        tx.execute(
            "INSERT INTO routines (id, name, creator_user_id, created_at, edited_at, elimination_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                routine.id,
                routine.name,
                routine.creator_user_id,
                to_millis(routine.created_at),
                to_millis(routine.edited_at),
                routine.elimination_date.map(to_millis),
            ],
        )
        .map_err(|e| from_rusqlite_unique(OP, &routine.name, e))?;

        for (position, entry) in routine.exercises.iter().enumerate() {
            Self::insert_entry_at(&tx, &routine.id, position, entry)
                .map_err(|e| from_rusqlite(OP, e))?;
        }

        tx.commit().map_err(|e| from_rusqlite(OP, e))?;
        Ok(routine.id.clone())
    }

    fn find_by_id(&self, routine_id: &str) -> StoreResult<Option<Routine>> {
        const OP: &str = "routine_find";
        let sql = format!("SELECT {} FROM routines WHERE id = ?1", RoutineRow::COLUMNS);
        let row = self
            .conn
            .query_row(&sql, [routine_id], RoutineRow::read)
            .optional()
            .map_err(|e| from_rusqlite(OP, e))?;

        match row {
            Some(row) => {
                let exercises = self.entries_of(routine_id)?;
                row.into_routine(OP, exercises).map(Some)
            }
            None => Ok(None),
        }
    }

    fn find_all(&self) -> StoreResult<Vec<Routine>> {
        const OP: &str = "routine_find_all";

        let sql = format!(
            "SELECT {} FROM routine_exercises ORDER BY routine_id, position",
            EntryRow::COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql).map_err(|e| from_rusqlite(OP, e))?;
        let entry_rows = stmt
            .query_map([], EntryRow::read)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| from_rusqlite(OP, e))?;

        let mut entries: HashMap<String, Vec<ExerciseEntry>> = HashMap::new();
        for row in entry_rows {
            let (routine_id, entry) = row.into_entry(OP)?;
            entries.entry(routine_id).or_default().push(entry);
        }

        let sql = format!(
            "SELECT {} FROM routines ORDER BY created_at, id",
            RoutineRow::COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql).map_err(|e| from_rusqlite(OP, e))?;
        let routine_rows = stmt
            .query_map([], RoutineRow::read)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| from_rusqlite(OP, e))?;

        routine_rows
            .into_iter()
            .map(|row| {
                let exercises = entries.remove(&row.id).unwrap_or_default();
                row.into_routine(OP, exercises)
            })
            .collect()
    }

    fn exists_by_normalized_name(&self, name: &str) -> StoreResult<bool> {
        self.conn
            .query_row("SELECT 1 FROM routines WHERE name = ?1", [name], |_| Ok(()))
            .optional()
            .map(|found| found.is_some())
            .map_err(|e| from_rusqlite("routine_name_exists", e))
    }

    fn replace_whole_document(&self, routine: &Routine) -> StoreResult<u64> {
        let updated = self
            .conn
            .execute(
                "UPDATE routines
                 SET name = ?2, creator_user_id = ?3, created_at = ?4, edited_at = ?5,
                     elimination_date = ?6
                 WHERE id = ?1",
                params![
                    routine.id,
                    routine.name,
                    routine.creator_user_id,
                    to_millis(routine.created_at),
                    to_millis(routine.edited_at),
                    routine.elimination_date.map(to_millis),
                ],
            )
            .map_err(|e| from_rusqlite_unique("routine_replace", &routine.name, e))?;
        Ok(updated as u64)
    }

    fn append_entry(&self, routine_id: &str, entry: &ExerciseEntry) -> StoreResult<u64> {
        let inserted = self
            .conn
            .execute(
                "INSERT INTO routine_exercises
                    (routine_id, position, exercise_id, repetitions, series, weight, created_at, elimination_date)
                 SELECT r.id,
                        COALESCE((SELECT MAX(position) + 1 FROM routine_exercises WHERE routine_id = r.id), 0),
                        ?2, ?3, ?4, ?5, ?6, ?7
                 FROM routines r
                 WHERE r.id = ?1",
                params![
                    routine_id,
                    entry.exercise_id,
                    entry.repetitions,
                    entry.series,
                    entry.weight,
                    to_millis(entry.created_at),
                    entry.elimination_date.map(to_millis),
                ],
            )
            .map_err(|e| from_rusqlite("routine_append_entry", e))?;
        Ok(inserted as u64)
    }

    fn update_entry_fields(
        &self,
        routine_id: &str,
        exercise_id: &str,
        patch: &EntryPatch,
    ) -> StoreResult<MutationOutcome> {
        const OP: &str = "routine_update_entry";
        if !self.routine_exists(OP, routine_id)? {
            return Ok(MutationOutcome::default());
        }

        let modified = self
            .conn
            .execute(
                "UPDATE routine_exercises
                 SET repetitions = COALESCE(?3, repetitions),
                     series = COALESCE(?4, series),
                     weight = COALESCE(?5, weight)
                 WHERE routine_id = ?1 AND exercise_id = ?2",
                params![
                    routine_id,
                    exercise_id,
                    patch.repetitions,
                    patch.series,
                    patch.weight,
                ],
            )
            .map_err(|e| from_rusqlite(OP, e))?;

        Ok(MutationOutcome {
            matched: 1,
            modified: modified as u64,
        })
    }

    fn remove_entry(&self, routine_id: &str, exercise_id: &str) -> StoreResult<MutationOutcome> {
        const OP: &str = "routine_remove_entry";
        if !self.routine_exists(OP, routine_id)? {
            return Ok(MutationOutcome::default());
        }

        let removed = self
            .conn
            .execute(
                "DELETE FROM routine_exercises WHERE routine_id = ?1 AND exercise_id = ?2",
                params![routine_id, exercise_id],
            )
            .map_err(|e| from_rusqlite(OP, e))?;

        Ok(MutationOutcome {
            matched: 1,
            modified: removed as u64,
        })
    }

    fn stamp_edition(&self, routine_id: &str, at: DateTime<Utc>) -> StoreResult<u64> {
        let updated = self
            .conn
            .execute(
                "UPDATE routines SET edited_at = ?2 WHERE id = ?1",
                params![routine_id, to_millis(at)],
            )
            .map_err(|e| from_rusqlite("routine_stamp_edition", e))?;
        Ok(updated as u64)
    }

    fn delete(&self, routine_id: &str) -> StoreResult<u64> {
        const OP: &str = "routine_delete";
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| from_rusqlite(OP, e))?;

        tx.execute(
            "DELETE FROM routine_exercises WHERE routine_id = ?1",
            [routine_id],
        )
        .map_err(|e| from_rusqlite(OP, e))?;
        let deleted = tx
            .execute("DELETE FROM routines WHERE id = ?1", [routine_id])
            .map_err(|e| from_rusqlite(OP, e))?;

        tx.commit().map_err(|e| from_rusqlite(OP, e))?;
        Ok(deleted as u64)
    }
}

impl WorkoutStore for SqliteStore<'_> {
    fn insert(&self, workout: &Workout) -> StoreResult<String> {
        self.conn
            .execute(
                "INSERT INTO workouts (id, user_id, routine_id, routine_name, done_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    workout.id,
                    workout.user_id,
                    workout.routine_id,
                    workout.routine_name,
                    to_millis(workout.done_at),
                ],
            )
            .map_err(|e| from_rusqlite("workout_insert", e))?;
        Ok(workout.id.clone())
    }

    fn find_by_id(&self, workout_id: &str) -> StoreResult<Option<Workout>> {
        const OP: &str = "workout_find";
        let sql = format!("SELECT {} FROM workouts WHERE id = ?1", WorkoutRow::COLUMNS);
        self.conn
            .query_row(&sql, [workout_id], WorkoutRow::read)
            .optional()
            .map_err(|e| from_rusqlite(OP, e))?
            .map(|row| row.into_workout(OP))
            .transpose()
    }

    fn find_all_by_user(&self, user_id: &str) -> StoreResult<Vec<Workout>> {
        const OP: &str = "workout_find_by_user";
        let sql = format!(
            "SELECT {} FROM workouts WHERE user_id = ?1",
            WorkoutRow::COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql).map_err(|e| from_rusqlite(OP, e))?;
        let rows = stmt
            .query_map([user_id], WorkoutRow::read)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| from_rusqlite(OP, e))?;

        rows.into_iter().map(|row| row.into_workout(OP)).collect()
    }

    fn delete(&self, workout_id: &str) -> StoreResult<u64> {
        let deleted = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?1", [workout_id])
            .map_err(|e| from_rusqlite("workout_delete", e))?;
        Ok(deleted as u64)
    }
}
