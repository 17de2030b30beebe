use jsonseed_storage::{CollectionStore, DocumentStore, StorageError};
use jsonseed_types::{Clock, SeedValue, Timestamp};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn doc(value: serde_json::Value) -> SeedValue {
    SeedValue::from(value)
}

// ── Single inserts ───────────────────────────────────────────────

#[test]
fn insert_one_assigns_id() {
    let mut store = CollectionStore::open_in_memory("seed", "users").unwrap();
    let id = store.insert_one(&doc(json!({"name": "ada"}))).unwrap();

    assert_eq!(store.count().unwrap(), 1);
    let stored = store.find_by_id(&id).unwrap().unwrap();
    assert_eq!(stored["_id"], json!(id));
    assert_eq!(stored["name"], json!("ada"));
}

#[test]
fn insert_one_keeps_given_id() {
    let mut store = CollectionStore::open_in_memory("seed", "users").unwrap();
    let id = store
        .insert_one(&doc(json!({"_id": "user-1", "name": "ada"})))
        .unwrap();
    assert_eq!(id, "user-1");
    assert!(store.find_by_id("user-1").unwrap().is_some());
    assert!(store.find_by_id("user-2").unwrap().is_none());
}

#[test]
fn insert_one_rejects_non_object() {
    let mut store = CollectionStore::open_in_memory("seed", "users").unwrap();
    let err = store.insert_one(&doc(json!("just a string"))).unwrap_err();
    assert!(matches!(err, StorageError::InvalidDocument(_)));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn duplicate_id_is_a_database_error() {
    let mut store = CollectionStore::open_in_memory("seed", "users").unwrap();
    store.insert_one(&doc(json!({"_id": "dup"}))).unwrap();
    let err = store.insert_one(&doc(json!({"_id": "dup"}))).unwrap_err();
    assert!(matches!(err, StorageError::Database(_)));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn timestamps_are_stored_as_iso_text() {
    let instant = chrono::NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_micro_opt(9, 15, 30, 250_000)
        .unwrap();
    let mut members = jsonseed_types::Object::new();
    members.insert(
        "created".to_string(),
        SeedValue::Timestamp(Timestamp::at(instant, Clock::Utc)),
    );

    let mut store = CollectionStore::open_in_memory("seed", "events").unwrap();
    let id = store.insert_one(&SeedValue::Object(members)).unwrap();
    let stored = store.find_by_id(&id).unwrap().unwrap();
    assert_eq!(stored["created"], json!("2024-05-17T09:15:30.250000"));
}

#[test]
fn timestamp_id_is_found_by_its_iso_text() {
    let instant = chrono::NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_micro_opt(9, 15, 30, 250_000)
        .unwrap();
    let mut members = jsonseed_types::Object::new();
    members.insert(
        "_id".to_string(),
        SeedValue::Timestamp(Timestamp::at(instant, Clock::Local)),
    );

    let mut store = CollectionStore::open_in_memory("seed", "events").unwrap();
    let id = store.insert_one(&SeedValue::Object(members)).unwrap();
    assert_eq!(id, "2024-05-17T09:15:30.250000");
    let stored = store.find_by_id(&id).unwrap().unwrap();
    assert_eq!(stored["_id"], json!(id));
}

// ── Batches ──────────────────────────────────────────────────────

#[test]
fn insert_many_preserves_order() {
    let mut store = CollectionStore::open_in_memory("seed", "users").unwrap();
    let batch: Vec<SeedValue> = (0..5).map(|n| doc(json!({"n": n}))).collect();
    let ids = store.insert_many(&batch).unwrap();

    assert_eq!(ids.len(), 5);
    let ns: Vec<i64> = store
        .documents()
        .unwrap()
        .iter()
        .map(|d| d["n"].as_i64().unwrap())
        .collect();
    assert_eq!(ns, vec![0, 1, 2, 3, 4]);
}

#[test]
fn insert_many_is_all_or_nothing() {
    let mut store = CollectionStore::open_in_memory("seed", "users").unwrap();
    let batch = vec![
        doc(json!({"_id": "a"})),
        doc(json!({"_id": "b"})),
        doc(json!({"_id": "a"})),
    ];
    assert!(store.insert_many(&batch).is_err());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn insert_many_rejects_empty_batch() {
    let mut store = CollectionStore::open_in_memory("seed", "users").unwrap();
    let err = store.insert_many(&[]).unwrap_err();
    assert!(matches!(err, StorageError::InvalidDocument(_)));
}

#[test]
fn insert_many_rejects_batch_with_non_object() {
    let mut store = CollectionStore::open_in_memory("seed", "users").unwrap();
    let batch = vec![doc(json!({"a": 1})), doc(json!(2))];
    assert!(store.insert_many(&batch).is_err());
    assert_eq!(store.count().unwrap(), 0);
}

// ── Names and files ──────────────────────────────────────────────

#[test]
fn invalid_names_are_rejected() {
    let err = CollectionStore::open_in_memory("seed", "drop table").err().unwrap();
    assert!(matches!(err, StorageError::InvalidName { kind: "collection", .. }));

    let err = CollectionStore::open_in_memory("", "users").err().unwrap();
    assert!(matches!(err, StorageError::InvalidName { kind: "database", .. }));
}

#[test]
fn collections_are_separate_tables() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.duckdb");
    {
        let mut users = CollectionStore::open(&path, "seed", "users").unwrap();
        users.insert_one(&doc(json!({"n": 1}))).unwrap();
    }
    let orders = CollectionStore::open(&path, "seed", "orders").unwrap();
    assert_eq!(orders.collection(), "orders");
    assert_eq!(orders.database(), "seed");
    assert_eq!(orders.count().unwrap(), 0);
}

#[test]
fn documents_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.duckdb");
    {
        let mut store = CollectionStore::open(&path, "seed", "users").unwrap();
        store
            .insert_many(&[doc(json!({"n": 1})), doc(json!({"n": 2}))])
            .unwrap();
    }
    let mut store = CollectionStore::open(&path, "seed", "users").unwrap();
    assert_eq!(store.count().unwrap(), 2);
    store.insert_one(&doc(json!({"n": 3}))).unwrap();
    assert_eq!(store.count().unwrap(), 3);
}
