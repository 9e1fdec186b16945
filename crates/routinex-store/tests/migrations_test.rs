// Integration tests for the migration framework

use routinex_store::migrations::{applied_migrations, apply_migrations};
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    let tables = table_names(&conn);
    for expected in [
        "exercises",
        "routine_exercises",
        "routines",
        "schema_version",
        "users",
        "workouts",
    ] {
        assert!(tables.contains(&expected.to_string()), "missing table {}", expected);
    }
}

#[test]
fn test_reapplying_is_a_no_op() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(applied_migrations(&conn).unwrap(), vec!["001_initial_schema"]);
}

#[test]
fn test_tampered_checksum_is_rejected() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();
    conn.execute(
        "UPDATE schema_version SET checksum = 'deadbeef' WHERE migration_id = '001_initial_schema'",
        [],
    )
    .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert_eq!(err.op(), Some("migration_checksum"));
    assert!(err.message().contains("001_initial_schema"));
}

#[test]
fn test_routine_names_are_unique() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    conn.execute(
        "INSERT INTO routines (id, name, creator_user_id, created_at, edited_at) VALUES ('a', 'push', 'u', 0, 0)",
        [],
    )
    .unwrap();
    let dup = conn.execute(
        "INSERT INTO routines (id, name, creator_user_id, created_at, edited_at) VALUES ('b', 'push', 'u', 0, 0)",
        [],
    );
    assert!(dup.is_err());
}

#[test]
fn test_persisted_across_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("store.db");

    {
        let conn = routinex_store::db::open(&path).unwrap();
        conn.execute("INSERT INTO users (id) VALUES ('u1')", []).unwrap();
    }

    let conn = routinex_store::db::open(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
