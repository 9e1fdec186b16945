use crate::errors::{Result, RoutineXError};
use crate::model::{EntryPatch, NewExerciseEntry};

/// Canonical form of a routine name: trimmed and lowercased
///
/// Uniqueness and rename comparisons are made on this form only.
pub fn normalize_routine_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize a routine name, rejecting names that are blank
///
/// # Errors
/// * `EmptyRoutineName` - If nothing remains after trimming
pub fn validated_routine_name(name: &str) -> Result<String> {
    let normalized = normalize_routine_name(name);
    if normalized.is_empty() {
        return Err(RoutineXError::EmptyRoutineName);
    }
    Ok(normalized)
}

fn check_repetitions(repetitions: u32) -> Result<()> {
    if repetitions == 0 {
        return Err(RoutineXError::InvalidEntryField {
            field: "repetitions",
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

fn check_series(series: u32) -> Result<()> {
    if series == 0 {
        return Err(RoutineXError::InvalidEntryField {
            field: "series",
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

fn check_weight(weight: f64) -> Result<()> {
    // NaN fails the comparison too
    if !weight.is_finite() || !(weight >= 0.0) {
        return Err(RoutineXError::InvalidEntryField {
            field: "weight",
            reason: format!("must be a finite value >= 0, got {}", weight),
        });
    }
    Ok(())
}

/// Check repetitions > 0, series > 0 and weight >= 0
///
/// # Errors
/// * `InvalidEntryField` - Naming the first offending field
pub fn validate_new_entry(entry: &NewExerciseEntry) -> Result<()> {
    if entry.exercise_id.trim().is_empty() {
        return Err(RoutineXError::InvalidEntryField {
            field: "exercise_id",
            reason: "cannot be empty".to_string(),
        });
    }
    check_repetitions(entry.repetitions)?;
    check_series(entry.series)?;
    check_weight(entry.weight)
}

/// Check that a patch supplies at least one field and that every supplied
/// field is in range
///
/// # Errors
/// * `EmptyEntryPatch` - No field supplied
/// * `InvalidEntryField` - A supplied field is out of range
pub fn validate_patch(exercise_id: &str, patch: &EntryPatch) -> Result<()> {
    if patch.is_empty() {
        return Err(RoutineXError::EmptyEntryPatch {
            exercise_id: exercise_id.to_string(),
        });
    }
    if let Some(repetitions) = patch.repetitions {
        check_repetitions(repetitions)?;
    }
    if let Some(series) = patch.series {
        check_series(series)?;
    }
    if let Some(weight) = patch.weight {
        check_weight(weight)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_routine_name() {
        assert_eq!(normalize_routine_name("  Leg Day "), "leg day");
        assert_eq!(normalize_routine_name("PUSH"), "push");
    }

    #[test]
    fn test_validated_routine_name_rejects_blank() {
        assert!(matches!(
            validated_routine_name("   "),
            Err(RoutineXError::EmptyRoutineName)
        ));
    }

    #[test]
    fn test_validate_new_entry() {
        assert!(validate_new_entry(&NewExerciseEntry::new("e1", 10, 3, 0.0)).is_ok());

        let err = validate_new_entry(&NewExerciseEntry::new("e1", 0, 3, 20.0)).unwrap_err();
        assert!(matches!(
            err,
            RoutineXError::InvalidEntryField {
                field: "repetitions",
                ..
            }
        ));

        let err = validate_new_entry(&NewExerciseEntry::new("e1", 10, 0, 20.0)).unwrap_err();
        assert!(matches!(
            err,
            RoutineXError::InvalidEntryField { field: "series", .. }
        ));

        let err = validate_new_entry(&NewExerciseEntry::new("e1", 10, 3, -0.5)).unwrap_err();
        assert!(matches!(
            err,
            RoutineXError::InvalidEntryField { field: "weight", .. }
        ));

        assert!(validate_new_entry(&NewExerciseEntry::new("e1", 10, 3, f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_patch() {
        assert!(matches!(
            validate_patch("e1", &EntryPatch::default()),
            Err(RoutineXError::EmptyEntryPatch { .. })
        ));
        assert!(validate_patch("e1", &EntryPatch::default().with_weight(0.0)).is_ok());
        assert!(validate_patch("e1", &EntryPatch::default().with_series(0)).is_err());
    }
}
