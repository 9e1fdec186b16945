use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One exercise prescription embedded in a routine
///
/// Entries have no identity outside their routine; update and remove
/// address them by `(routine_id, exercise_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Catalog exercise this entry refers to
    pub exercise_id: String,

    /// Repetitions per series (always > 0 once persisted)
    pub repetitions: u32,

    /// Number of series (always > 0 once persisted)
    pub series: u32,

    /// Load in kilograms (always >= 0 once persisted)
    pub weight: f64,

    pub created_at: DateTime<Utc>,

    /// Never populated; entries are hard-removed
    pub elimination_date: Option<DateTime<Utc>>,
}

impl ExerciseEntry {
    /// Build a persisted entry from validated input, stamped now
    pub fn from_new(input: NewExerciseEntry) -> Self {
        Self {
            exercise_id: input.exercise_id,
            repetitions: input.repetitions,
            series: input.series,
            weight: input.weight,
            created_at: Utc::now(),
            elimination_date: None,
        }
    }

    /// Overwrite the fields the patch supplies
    pub fn apply_patch(&mut self, patch: &EntryPatch) {
        if let Some(repetitions) = patch.repetitions {
            self.repetitions = repetitions;
        }
        if let Some(series) = patch.series {
            self.series = series;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
    }
}

/// Caller input for AddExerciseEntry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExerciseEntry {
    pub exercise_id: String,
    pub repetitions: u32,
    pub series: u32,
    pub weight: f64,
}

impl NewExerciseEntry {
    pub fn new(exercise_id: impl Into<String>, repetitions: u32, series: u32, weight: f64) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            repetitions,
            series,
            weight,
        }
    }
}

/// Partial update for an exercise entry
///
/// `None` means "not supplied". A supplied value is applied as-is, so it
/// must satisfy the same ranges as a new entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryPatch {
    pub repetitions: Option<u32>,
    pub series: Option<u32>,
    pub weight: Option<f64>,
}

impl EntryPatch {
    /// Build a patch from the legacy sentinel convention
    ///
    /// Non-positive repetitions/series and negative weight mean "omitted".
    pub fn from_sentinels(repetitions: i64, series: i64, weight: f64) -> Self {
        Self {
            repetitions: u32::try_from(repetitions).ok().filter(|r| *r > 0),
            series: u32::try_from(series).ok().filter(|s| *s > 0),
            weight: (weight >= 0.0).then_some(weight),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.repetitions.is_none() && self.series.is_none() && self.weight.is_none()
    }

    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = Some(repetitions);
        self
    }

    pub fn with_series(mut self, series: u32) -> Self {
        self.series = Some(series);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sentinels_treats_zero_as_absent() {
        let patch = EntryPatch::from_sentinels(0, 5, -1.0);
        assert_eq!(patch.repetitions, None);
        assert_eq!(patch.series, Some(5));
        assert_eq!(patch.weight, None);
    }

    #[test]
    fn test_from_sentinels_keeps_zero_weight() {
        let patch = EntryPatch::from_sentinels(-3, 0, 0.0);
        assert!(patch.repetitions.is_none());
        assert!(patch.series.is_none());
        assert_eq!(patch.weight, Some(0.0));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_apply_patch_only_touches_supplied_fields() {
        let mut entry = ExerciseEntry::from_new(NewExerciseEntry::new("e1", 10, 3, 20.0));
        entry.apply_patch(&EntryPatch::default().with_series(5));

        assert_eq!(entry.series, 5);
        assert_eq!(entry.repetitions, 10);
        assert_eq!(entry.weight, 20.0);
    }
}
