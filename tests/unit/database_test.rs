//! Unit tests for the ChatFolders database layer (connection + migrations).

use chatfolders::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use chatfolders::database::Database;
use tempfile::TempDir;

#[test]
fn test_open_in_memory_succeeds() {
    assert!(Database::open_in_memory().is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_kv_store() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='kv_store'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "kv_store should exist after migrations");
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

/// Reopening an existing file must not re-run or duplicate migrations.
#[test]
fn test_reopen_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("cf.db");
    {
        let db = Database::open(&path).expect("first open failed");
        db.connection()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES ('k', 'v', 0)",
                [],
            )
            .unwrap();
    }
    let db = Database::open(&path).expect("second open failed");
    let versions: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(versions, 1);
    let value: String = db
        .connection()
        .query_row("SELECT value FROM kv_store WHERE key = 'k'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(value, "v");
}
