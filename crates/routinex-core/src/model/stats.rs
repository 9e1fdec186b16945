use serde::{Deserialize, Serialize};

/// Usage count of one routine name across a user's workouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineUsage {
    pub routine_name: String,
    pub count: usize,
}

/// Workout count for one calendar month (`YYYY-MM`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub month: String,
    pub count: usize,
}

/// Statistics derived on read from a user's full workout history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub weekly_frequency: f64,
    pub most_used_routines: Vec<RoutineUsage>,
    pub progress_over_time: Vec<ProgressPoint>,
}

impl WorkoutStats {
    /// Stats with only the total set; every derived field at zero/empty
    pub fn totals_only(total_workouts: usize) -> Self {
        Self {
            total_workouts,
            ..Self::default()
        }
    }
}

/// How often one catalog exercise appears across all routines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseUsage {
    pub exercise_id: String,
    pub exercise_name: String,
    pub count: usize,
}
