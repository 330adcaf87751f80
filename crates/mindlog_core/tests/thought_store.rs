use mindlog_core::db::{open_db_in_memory, DbError};
use mindlog_core::model::distortion::by_slug;
use mindlog_core::model::thought::thought_key;
use mindlog_core::{
    CreateThoughtArgs, JournalService, KeyValueStore, KvError, KvResult, SqliteKeyValueStore,
    StoreError, ThoughtRepository, CURRENT_VERSION, THOUGHTS_KEY_PREFIX,
};

/// Store double that refuses every operation, as if the database file
/// vanished mid-session.
struct UnavailableStore;

impl UnavailableStore {
    fn failure() -> KvError {
        KvError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery))
    }
}

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> KvResult<Option<String>> {
        Err(Self::failure())
    }

    fn set(&self, _key: &str, _value: &str) -> KvResult<()> {
        Err(Self::failure())
    }

    fn remove(&self, _key: &str) -> KvResult<()> {
        Err(Self::failure())
    }

    fn list_keys_with_prefix(&self, _prefix: &str) -> KvResult<Vec<String>> {
        Err(Self::failure())
    }
}

fn sample_args(text: &str) -> CreateThoughtArgs {
    CreateThoughtArgs {
        automatic_thought: text.to_string(),
        challenge: "challenge".to_string(),
        alternative_thought: "alternative".to_string(),
        cognitive_distortions: vec![by_slug("catastrophizing").unwrap()],
    }
}

#[test]
fn write_and_read_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = ThoughtRepository::new(SqliteKeyValueStore::new(&conn));

    let thought = mindlog_core::Thought::create(sample_args("spilled coffee on the laptop"));
    repo.write(&thought).unwrap();

    let loaded = repo.read(&thought.uuid).unwrap();
    assert_eq!(loaded, thought);
}

#[test]
fn read_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = ThoughtRepository::new(SqliteKeyValueStore::new(&conn));

    let id = thought_key("does-not-exist");
    let err = repo.read(&id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
}

#[test]
fn overwrite_under_same_key_is_last_write_wins() {
    let conn = open_db_in_memory().unwrap();
    let repo = ThoughtRepository::new(SqliteKeyValueStore::new(&conn));

    let mut thought = mindlog_core::Thought::create(sample_args("first version"));
    repo.write(&thought).unwrap();

    thought.alternative_thought = "revised alternative".to_string();
    thought.touch();
    repo.write(&thought).unwrap();

    let loaded = repo.read(&thought.uuid).unwrap();
    assert_eq!(loaded.alternative_thought, "revised alternative");
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn remove_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = ThoughtRepository::new(SqliteKeyValueStore::new(&conn));

    let thought = mindlog_core::Thought::create(sample_args("to be deleted"));
    repo.write(&thought).unwrap();
    repo.remove(&thought.uuid).unwrap();
    repo.remove(&thought.uuid).unwrap();

    assert!(matches!(
        repo.read(&thought.uuid).unwrap_err(),
        StoreError::NotFound(_)
    ));
}

#[test]
fn read_all_isolates_corrupt_records() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    let repo = ThoughtRepository::new(SqliteKeyValueStore::new(&conn));
    let good = mindlog_core::Thought::create(sample_args("still readable"));
    repo.write(&good).unwrap();

    let corrupt_key = thought_key("corrupt");
    store.set(&corrupt_key, "{definitely not json").unwrap();

    let rows = repo.read_all().unwrap();
    assert_eq!(rows.len(), 2);
    for (key, result) in rows {
        if key == corrupt_key {
            assert!(matches!(result, Err(StoreError::Decode(_))));
        } else {
            assert_eq!(result.unwrap(), good);
        }
    }
}

#[test]
fn count_includes_undecodable_records() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let repo = ThoughtRepository::new(SqliteKeyValueStore::new(&conn));

    store.set(&thought_key("garbage"), "null").unwrap();
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn non_thought_keys_never_appear_in_listing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let repo = ThoughtRepository::new(SqliteKeyValueStore::new(&conn));

    store.set("@Mindlog:existing-user", "true").unwrap();
    store.set("unrelated-key", "whatever").unwrap();

    assert!(repo.read_all().unwrap().is_empty());
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn existing_user_flag_defaults_to_false_and_sticks() {
    let conn = open_db_in_memory().unwrap();
    let repo = ThoughtRepository::new(SqliteKeyValueStore::new(&conn));

    assert!(!repo.is_existing_user().unwrap());
    repo.set_existing_user().unwrap();
    assert!(repo.is_existing_user().unwrap());
}

#[test]
fn service_create_persists_and_returns_the_record() {
    let conn = open_db_in_memory().unwrap();
    let service = JournalService::new(ThoughtRepository::new(SqliteKeyValueStore::new(&conn)));

    let created = service.create_thought(sample_args("service entry")).unwrap();
    assert!(created.uuid.starts_with(THOUGHTS_KEY_PREFIX));
    assert_eq!(created.v, CURRENT_VERSION);
    assert_eq!(created.created_at_ms, created.updated_at_ms);

    let loaded = service.get_thought(&created.uuid).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn service_listing_skips_corrupt_records() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let service = JournalService::new(ThoughtRepository::new(SqliteKeyValueStore::new(&conn)));

    let kept = service.create_thought(sample_args("kept")).unwrap();
    store
        .set(&thought_key("broken"), r#"{"uuid": 42}"#)
        .unwrap();

    let listed = service.list_thoughts();
    assert_eq!(listed, vec![kept]);
}

#[test]
fn service_listing_degrades_to_empty_when_storage_fails() {
    let service = JournalService::new(ThoughtRepository::new(UnavailableStore));
    assert!(service.list_thoughts().is_empty());
}

#[test]
fn existing_user_check_degrades_to_false_when_storage_fails() {
    let service = JournalService::new(ThoughtRepository::new(UnavailableStore));
    assert!(!service.is_existing_user());
}

#[test]
fn service_single_record_read_is_intolerant_of_corruption() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let service = JournalService::new(ThoughtRepository::new(SqliteKeyValueStore::new(&conn)));

    let key = thought_key("broken");
    store.set(&key, "not even json").unwrap();

    let err = service.get_thought(&key).unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
}

#[test]
fn service_grouped_listing_buckets_by_day() {
    let conn = open_db_in_memory().unwrap();
    let service = JournalService::new(ThoughtRepository::new(SqliteKeyValueStore::new(&conn)));

    service.create_thought(sample_args("one")).unwrap();
    service.create_thought(sample_args("two")).unwrap();

    let groups = service.grouped_by_day(&chrono::Utc);
    // Both created "now", so they land in a single group.
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].thoughts.len(), 2);
}

#[test]
fn service_delete_then_list_omits_the_record() {
    let conn = open_db_in_memory().unwrap();
    let service = JournalService::new(ThoughtRepository::new(SqliteKeyValueStore::new(&conn)));

    let first = service.create_thought(sample_args("first")).unwrap();
    let second = service.create_thought(sample_args("second")).unwrap();

    service.delete_thought(&first.uuid).unwrap();
    let listed = service.list_thoughts();
    assert_eq!(listed, vec![second]);
}
