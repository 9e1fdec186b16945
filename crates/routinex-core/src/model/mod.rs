pub mod actor;
pub mod exercise_entry;
pub mod routine;
pub mod stats;
pub mod workout;

pub use actor::{Actor, Role};
pub use exercise_entry::{EntryPatch, ExerciseEntry, NewExerciseEntry};
pub use routine::Routine;
pub use stats::{ExerciseUsage, ProgressPoint, RoutineUsage, WorkoutStats};
pub use workout::Workout;
