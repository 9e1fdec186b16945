use std::collections::HashMap;

use crate::errors::Result;
use crate::model::{Actor, ExerciseUsage, Routine};
use crate::policy::ensure_admin;
use crate::ports::{ExerciseCatalog, RoutineStore};

/// Global ranking of catalog exercises by how many routine entries use them
///
/// # Errors
/// * `AdminRequired` - If `actor` is not an admin
pub fn get_exercise_ranking(
    routines: &dyn RoutineStore,
    catalog: &dyn ExerciseCatalog,
    actor: &Actor,
) -> Result<Vec<ExerciseUsage>> {
    ensure_admin(actor, "exercise_ranking")?;
    let all = routines.find_all()?;
    rank_exercises(&all, catalog)
}

/// Count entries per exercise id across `routines` and resolve names
///
/// Ids missing from the catalog keep an empty name. Sorted by count
/// descending, then name, then id.
pub fn rank_exercises(
    routines: &[Routine],
    catalog: &dyn ExerciseCatalog,
) -> Result<Vec<ExerciseUsage>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in routines.iter().flat_map(|r| r.exercises.iter()) {
        *counts.entry(entry.exercise_id.as_str()).or_default() += 1;
    }

    let mut ranking = Vec::with_capacity(counts.len());
    for (exercise_id, count) in counts {
        let exercise_name = catalog.exists_and_name(exercise_id)?.unwrap_or_default();
        ranking.push(ExerciseUsage {
            exercise_id: exercise_id.to_string(),
            exercise_name,
            count,
        });
    }

    ranking.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.exercise_name.cmp(&b.exercise_name))
            .then_with(|| a.exercise_id.cmp(&b.exercise_id))
    });
    Ok(ranking)
}
