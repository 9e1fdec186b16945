// Integration tests for workout and analytics handlers.

use chrono::{Duration, TimeZone, Utc};
use routinex_core::commands::{Command, CommandOutcome};
use routinex_core::errors::ExErrorKind;
use routinex_core::model::{Actor, NewExerciseEntry};
use routinex_engine::commands::engine_command::apply_engine_command;
use routinex_engine::commands::routine::{exercise_entry_add, routine_create, routine_rename};
use routinex_engine::commands::seed::{exercise_register, user_register};
use routinex_engine::commands::stats::{exercise_ranking, workout_stats};
use routinex_engine::commands::workout::{
    workout_delete, workout_get, workout_list, workout_post,
};
use rusqlite::Connection;
use tempfile::TempDir;

fn setup_db() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let conn = routinex_store::db::open(temp_dir.path().join("test.db")).unwrap();
    user_register(&conn, "userX").unwrap();
    user_register(&conn, "userY").unwrap();
    (temp_dir, conn)
}

#[test]
fn test_stats_for_user_without_workouts() {
    let (_tmp, conn) = setup_db();

    let stats = workout_stats(&conn, "userY", &Actor::client("userY")).unwrap();
    assert_eq!(stats.total_workouts, 0);
    assert_eq!(stats.weekly_frequency, 0.0);
    assert!(stats.most_used_routines.is_empty());
    assert!(stats.progress_over_time.is_empty());
}

#[test]
fn test_stats_unknown_user_is_not_found() {
    let (_tmp, conn) = setup_db();
    let err = workout_stats(&conn, "ghost", &Actor::client("userX")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_reads_require_known_actor() {
    let (_tmp, conn) = setup_db();
    let blank = Actor::client(" ");

    let err = workout_stats(&conn, "userX", &blank).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.op(), Some("workout_stats"));

    let err = workout_list(&conn, "userX", &blank).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_stats_over_logged_history() {
    let (_tmp, conn) = setup_db();
    let actor = Actor::client("userX");
    let push = routine_create(&conn, "Push", &actor).unwrap();
    let legs = routine_create(&conn, "Legs", &actor).unwrap();

    let t0 = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
    workout_post(&conn, &push.id, Some(t0), &actor).unwrap();
    workout_post(&conn, &push.id, Some(t0 + Duration::days(10)), &actor).unwrap();
    workout_post(&conn, &legs.id, Some(t0 + Duration::days(28)), &actor).unwrap();

    let stats = workout_stats(&conn, "userX", &actor).unwrap();
    assert_eq!(stats.total_workouts, 3);
    assert!((stats.weekly_frequency - 0.75).abs() < 1e-9);
    assert_eq!(stats.most_used_routines[0].routine_name, "push");
    assert_eq!(stats.most_used_routines[0].count, 2);

    let months: Vec<(&str, usize)> = stats
        .progress_over_time
        .iter()
        .map(|p| (p.month.as_str(), p.count))
        .collect();
    assert_eq!(months, vec![("2024-01", 2), ("2024-02", 1)]);
}

#[test]
fn test_workout_keeps_name_snapshot_after_rename() {
    let (_tmp, conn) = setup_db();
    let actor = Actor::client("userX");
    let routine = routine_create(&conn, "Push", &actor).unwrap();

    let workout = workout_post(&conn, &routine.id, None, &actor).unwrap();
    routine_rename(&conn, &routine.id, "Push Heavy", &actor).unwrap();

    assert_eq!(workout_get(&conn, &workout.id, &actor).unwrap().routine_name, "push");
    let stats = workout_stats(&conn, "userX", &actor).unwrap();
    assert_eq!(stats.most_used_routines[0].routine_name, "push");
}

#[test]
fn test_workout_delete_owner_only() {
    let (_tmp, conn) = setup_db();
    let actor = Actor::client("userX");
    let routine = routine_create(&conn, "Push", &actor).unwrap();
    let workout = workout_post(&conn, &routine.id, None, &actor).unwrap();

    let err = workout_delete(&conn, &workout.id, &Actor::client("userY")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);

    workout_delete(&conn, &workout.id, &actor).unwrap();
    assert!(workout_list(&conn, "userX", &actor).unwrap().is_empty());
}

#[test]
fn test_post_workout_unknown_routine() {
    let (_tmp, conn) = setup_db();
    let err = workout_post(&conn, "missing", None, &Actor::client("userX")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_exercise_ranking_admin_only() {
    let (_tmp, conn) = setup_db();
    exercise_register(&conn, "ex1", "Squat").unwrap();
    let actor = Actor::client("userX");
    let routine = routine_create(&conn, "Legs", &actor).unwrap();
    exercise_entry_add(
        &conn,
        &routine.id,
        NewExerciseEntry::new("ex1", 5, 5, 100.0),
        &actor,
    )
    .unwrap();

    let err = exercise_ranking(&conn, &actor).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);

    let ranking = exercise_ranking(&conn, &Actor::admin("root")).unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].exercise_name, "Squat");
    assert_eq!(ranking[0].count, 1);
}

#[test]
fn test_apply_engine_command_dispatch() {
    let (_tmp, conn) = setup_db();
    let actor = Actor::client("userX");

    let outcome = apply_engine_command(
        &conn,
        Command::RoutineCreate {
            name: "Core".to_string(),
        },
        &actor,
    )
    .unwrap();
    let CommandOutcome::Routine(routine) = outcome else {
        panic!("expected a routine");
    };

    let outcome = apply_engine_command(
        &conn,
        Command::RoutineDelete {
            routine_id: routine.id.clone(),
        },
        &actor,
    )
    .unwrap();
    assert_eq!(outcome, CommandOutcome::Deleted { id: routine.id });
}
