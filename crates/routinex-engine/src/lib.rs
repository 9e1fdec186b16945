//! RoutineX Engine - Boundary layer
//!
//! Runs the core operations against SQLite-backed collaborators and owns
//! lifecycle logging for every public operation.

pub mod commands;
