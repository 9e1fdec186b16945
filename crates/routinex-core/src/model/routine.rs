use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::exercise_entry::ExerciseEntry;

/// A named, owned template composed of an ordered list of exercise entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    /// Unique identifier (UUID v7)
    pub id: String,

    /// Normalized name (trimmed, lowercase), unique across routines
    pub name: String,

    /// Identity of the creating actor; only they may mutate the routine
    pub creator_user_id: String,

    /// Entries in insertion order
    pub exercises: Vec<ExerciseEntry>,

    pub created_at: DateTime<Utc>,

    /// Last time the name or the entry list changed
    pub edited_at: DateTime<Utc>,

    /// Never populated; routines are hard-deleted
    pub elimination_date: Option<DateTime<Utc>>,
}

impl Routine {
    /// Create an empty routine with current timestamps
    ///
    /// `name` is stored as given; callers normalize it first.
    pub fn new(id: String, name: String, creator_user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            creator_user_id,
            exercises: Vec::new(),
            created_at: now,
            edited_at: now,
            elimination_date: None,
        }
    }

    pub fn is_owned_by(&self, actor_id: &str) -> bool {
        self.creator_user_id == actor_id
    }

    pub fn has_exercise(&self, exercise_id: &str) -> bool {
        self.exercises.iter().any(|e| e.exercise_id == exercise_id)
    }

    /// Entries referencing `exercise_id`, in list order
    pub fn entries_for<'a>(
        &'a self,
        exercise_id: &'a str,
    ) -> impl Iterator<Item = &'a ExerciseEntry> + 'a {
        self.exercises
            .iter()
            .filter(move |e| e.exercise_id == exercise_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewExerciseEntry;

    #[test]
    fn test_new_routine() {
        let routine = Routine::new("r1".to_string(), "leg day".to_string(), "u1".to_string());

        assert_eq!(routine.id, "r1");
        assert!(routine.exercises.is_empty());
        assert!(routine.is_owned_by("u1"));
        assert!(!routine.is_owned_by("u2"));
        assert_eq!(routine.created_at, routine.edited_at);
        assert!(routine.elimination_date.is_none());
    }

    #[test]
    fn test_has_exercise() {
        let mut routine = Routine::new("r1".to_string(), "push".to_string(), "u1".to_string());
        routine
            .exercises
            .push(ExerciseEntry::from_new(NewExerciseEntry::new("e1", 8, 4, 60.0)));

        assert!(routine.has_exercise("e1"));
        assert!(!routine.has_exercise("e2"));
        assert_eq!(routine.entries_for("e1").count(), 1);
    }
}
