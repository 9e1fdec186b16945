//! Workout Analytics Engine
//!
//! Read-only statistics derived on demand. Nothing here writes to a store,
//! so every function is safe to call repeatedly and concurrently.

pub mod exercise_ranking;
pub mod workout_stats;

pub use exercise_ranking::{get_exercise_ranking, rank_exercises};
pub use workout_stats::{compute_workout_stats, get_workout_stats};
