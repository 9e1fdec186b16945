//! Command dispatch walkthrough
//!
//! Builds a routine through `apply()`, logs two workouts, and prints the
//! derived statistics, all against the in-memory store.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{Duration, Utc};
use routinex_core::analytics::get_workout_stats;
use routinex_core::{
    apply, Actor, Collaborators, Command, CommandOutcome, EntryPatch, MemoryStore,
    NewExerciseEntry,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    store.register_exercise("squat", "Back Squat")?;
    store.register_user("ana")?;

    let ports = Collaborators::from_store(&store);
    let ana = Actor::client("ana");

    let CommandOutcome::Routine(routine) = apply(
        ports,
        Command::RoutineCreate {
            name: "  Leg Day ".to_string(),
        },
        &ana,
    )?
    else {
        return Err("expected a routine".into());
    };
    println!("created '{}' ({})", routine.name, routine.id);

    apply(
        ports,
        Command::ExerciseEntryAdd {
            routine_id: routine.id.clone(),
            entry: NewExerciseEntry::new("squat", 8, 4, 80.0),
        },
        &ana,
    )?;
    apply(
        ports,
        Command::ExerciseEntryUpdate {
            routine_id: routine.id.clone(),
            exercise_id: "squat".to_string(),
            patch: EntryPatch::default().with_weight(85.0),
        },
        &ana,
    )?;

    // Someone else may not touch it
    let err = apply(
        ports,
        Command::RoutineDelete {
            routine_id: routine.id.clone(),
        },
        &Actor::client("bob"),
    )
    .unwrap_err();
    println!("bob's delete refused: {}", err);

    let now = Utc::now();
    for done_at in [now - Duration::days(7), now] {
        apply(
            ports,
            Command::WorkoutPost {
                routine_id: routine.id.clone(),
                done_at: Some(done_at),
            },
            &ana,
        )?;
    }

    let stats = get_workout_stats(&store, &store, "ana")?;
    println!(
        "{} workouts, {:.2} per week, favourite: {}",
        stats.total_workouts,
        stats.weekly_frequency,
        stats.most_used_routines[0].routine_name
    );

    Ok(())
}
