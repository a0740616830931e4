//! Migration tests

use quadra_storage::Database;
use tests::db::TestDatabase;

#[test]
fn test_migrations_run_successfully() {
    let test_db = TestDatabase::new();

    assert!(test_db.db_path().exists());
    assert_eq!(test_db.db.schema_version().unwrap(), 1);
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = TestDatabase::new();

    let reopened = Database::open(test_db.db_path()).unwrap();
    assert_eq!(reopened.schema_version().unwrap(), 1);
}

#[test]
fn test_database_creates_parent_directories() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("data").join("quadra").join("quadra.db");

    assert!(!db_path.exists());
    Database::open(&db_path).unwrap();
    assert!(db_path.exists());
}
