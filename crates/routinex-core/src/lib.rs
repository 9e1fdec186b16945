//! RoutineX Core - routine composition and workout analytics kernel
//!
//! This crate holds everything that does not depend on a concrete database:
//! - Routine, exercise entry and workout models
//! - Name normalization and entry validation rules
//! - Ownership and role checks
//! - Routine and workout operations over the collaborator traits in [`ports`]
//! - Read-side analytics (per-user workout stats, global exercise ranking)
//! - An in-memory [`MemoryStore`] implementing every collaborator
//!
//! Durable storage lives in `routinex-store`; logging of operation
//! lifecycles happens one layer up, in `routinex-engine`.

pub mod analytics;
pub mod apply;
pub mod commands;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod policy;
pub mod ports;
pub mod rules;

#[doc(hidden)]
pub use routinex_core_types;

// Re-export commonly used types
pub use apply::apply;
pub use commands::{Command, CommandOutcome};
pub use errors::{ExError, ExErrorKind, Result, RoutineXError};
pub use model::{
    Actor, EntryPatch, ExerciseEntry, ExerciseUsage, NewExerciseEntry, ProgressPoint, Role,
    Routine, RoutineUsage, Workout, WorkoutStats,
};
pub use ops::MemoryStore;
pub use ports::{
    Collaborators, ExerciseCatalog, MutationOutcome, RoutineStore, StoreResult, UserDirectory,
    WorkoutStore,
};
