//! Tests for profile persistence over SQLite.

use linguabird::{
    KeyValueStore, Language, PROFILE_KEY, ProfileRecord, ProfileStore, SqliteStore, StatsLedger,
};
use tempfile::NamedTempFile;

/// Creates a temporary database with migrations applied. The file handle
/// must stay in scope to keep the database alive.
fn setup_test_db() -> (NamedTempFile, SqliteStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::open(db_path).expect("Failed to open store");
    (db_file, store)
}

fn sample_record() -> ProfileRecord {
    let stats = StatsLedger::default()
        .with_xp(120)
        .with_streak(4)
        .with_name("Lia")
        .with_goal(30);
    ProfileRecord::new(stats, Language::by_code("es").expect("spanish in catalog"))
}

#[test]
fn test_missing_key_reads_none() {
    let (_db, store) = setup_test_db();
    assert!(store.get("nothing").expect("Query failed").is_none());
}

#[test]
fn test_put_then_get() {
    let (_db, mut store) = setup_test_db();
    store.put("k", "v1").expect("Write failed");
    assert_eq!(store.get("k").expect("Query failed").as_deref(), Some("v1"));
}

#[test]
fn test_put_replaces_existing_value() {
    let (_db, mut store) = setup_test_db();
    store.put("k", "v1").expect("First write failed");
    store.put("k", "v2").expect("Second write failed");
    let row = store.row("k").expect("Query failed").expect("Row missing");
    assert_eq!(row.value(), "v2");
    assert_eq!(row.key(), "k");
}

#[test]
fn test_reopen_keeps_data_and_migrations_are_idempotent() {
    let (db, mut store) = setup_test_db();
    store.put(PROFILE_KEY, "{}").expect("Write failed");

    let path = db.path().to_str().expect("Invalid path").to_string();
    let reopened = SqliteStore::open(path).expect("Reopen failed");
    assert_eq!(reopened.get(PROFILE_KEY).expect("Query failed").as_deref(), Some("{}"));
}

#[test]
fn test_profile_round_trip() {
    let (_db, store) = setup_test_db();
    let mut profiles = ProfileStore::new(store);
    assert!(profiles.load().expect("Load failed").is_none());

    let record = sample_record();
    profiles.save(&record).expect("Save failed");
    let loaded = profiles.load().expect("Load failed").expect("Profile missing");
    assert_eq!(loaded, record);
}

#[test]
fn test_stored_profile_uses_camel_case_json() {
    let (db, store) = setup_test_db();
    let mut profiles = ProfileStore::new(store);
    profiles.save(&sample_record()).expect("Save failed");

    let path = db.path().to_str().expect("Invalid path").to_string();
    let raw = SqliteStore::open(path)
        .expect("Reopen failed")
        .get(PROFILE_KEY)
        .expect("Query failed")
        .expect("Value missing");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("Invalid JSON");
    assert_eq!(json["stats"]["xp"], 120);
    assert_eq!(json["stats"]["currentLevel"], 1);
    assert_eq!(json["language"]["name"], "Espanhol");
}

#[test]
fn test_corrupted_profile_loads_as_none() {
    let (_db, mut store) = setup_test_db();
    store.put(PROFILE_KEY, r#"{"stats": 7}"#).expect("Write failed");
    let profiles = ProfileStore::new(store);
    assert!(profiles.load().expect("Load failed").is_none());
}

#[test]
fn test_open_fails_for_unreachable_path() {
    let result = SqliteStore::open("/nonexistent-dir/linguabird/profile.db".to_string());
    assert!(result.is_err());
}
