//! Unit tests for the Jobflow database layer (connection, migrations, local storage).

use jobflow::database::migrations::{get_schema_version, run_all, CURRENT_SCHEMA_VERSION};
use jobflow::database::{Database, LocalStorage};

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_local_storage_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    for table in ["schema_version", "local_storage"] {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .unwrap_or(false);
        assert!(exists, "Table '{}' should exist after migrations", table);
    }
}

#[test]
fn test_schema_version_is_current() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert_eq!(get_schema_version(&db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();
    run_all(&conn).expect("second run should succeed");
    run_all(&conn).expect("third run should succeed");

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, i64::from(CURRENT_SCHEMA_VERSION));
}

#[test]
fn test_local_storage_set_get_remove() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_item("jobflow_token").unwrap(), None);

    db.set_item("jobflow_token", "abc").unwrap();
    assert_eq!(db.get_item("jobflow_token").unwrap().as_deref(), Some("abc"));

    db.set_item("jobflow_token", "def").unwrap();
    assert_eq!(db.get_item("jobflow_token").unwrap().as_deref(), Some("def"));

    db.remove_item("jobflow_token").unwrap();
    assert_eq!(db.get_item("jobflow_token").unwrap(), None);
}

#[test]
fn test_file_database_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("jobflow.db");

    {
        let db = Database::open(&path).expect("open should create parent dirs");
        db.set_item("savedEventIds", "[3,9]").unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_item("savedEventIds").unwrap().as_deref(), Some("[3,9]"));
}
