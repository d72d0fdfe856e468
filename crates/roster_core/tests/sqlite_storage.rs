use roster_core::db::migrations::latest_version;
use roster_core::db::{open_db, open_db_in_memory, DbError};
use roster_core::{
    seed_persons, Avatar, KeyValueStore, KvPersonRepository, PersonDraft, PersonRepository,
    PersonStore, RepoError, SqliteKeyValueStore, StartupWarning, PERSONS_KEY,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    assert_eq!(schema_version(&conn), latest_version());
    assert!(SqliteKeyValueStore::try_new(&conn).is_ok());
}

#[test]
fn opening_same_file_twice_is_idempotent() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("roster.sqlite3");

    drop(open_db(&path).expect("first open should succeed"));
    let conn = open_db(&path).expect("db file should open");
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn opening_newer_database_returns_error() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).expect("raw connection should open");
    conn.execute_batch("PRAGMA user_version = 999;")
        .expect("user_version should be set");
    drop(conn);

    match open_db(&path).expect_err("newer schema should be rejected") {
        DbError::NewerLayout { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().expect("raw connection should open");
    match SqliteKeyValueStore::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_kv_table() {
    let conn = Connection::open_in_memory().expect("raw connection should open");
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .expect("user_version should be set");

    assert!(matches!(
        SqliteKeyValueStore::try_new(&conn),
        Err(RepoError::MissingRequiredTable("kv_entries"))
    ));
}

#[test]
fn store_rejects_connection_missing_column() {
    let conn = Connection::open_in_memory().expect("raw connection should open");
    conn.execute_batch(
        "CREATE TABLE kv_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )
    .expect("partial table should be created");
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .expect("user_version should be set");

    assert!(matches!(
        SqliteKeyValueStore::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "kv_entries",
            column: "updated_at"
        })
    ));
}

#[test]
fn set_overwrites_existing_value() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let store = SqliteKeyValueStore::try_new(&conn).expect("migrated connection should be accepted");

    assert_eq!(store.get("k").expect("get should succeed"), None);
    store.set("k", "first").expect("first set should succeed");
    store.set("k", "second").expect("overwrite should succeed");
    assert_eq!(store.get("k").expect("get should succeed").as_deref(), Some("second"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .expect("row count should be readable");
    assert_eq!(rows, 1);
}

#[test]
fn save_then_load_preserves_content_and_order() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let repo = KvPersonRepository::new(SqliteKeyValueStore::try_new(&conn).expect("migrated connection should be accepted"));

    let mut persons = seed_persons();
    persons.reverse();
    persons[0].avatar = Avatar::Custom("🦊".to_string());
    repo.save(&persons).expect("save should succeed");

    assert_eq!(repo.load().expect("load should succeed"), Some(persons));
}

#[test]
fn records_survive_reopening_the_file() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("roster.sqlite3");

    {
        let conn = open_db(&path).expect("db file should open");
        let repo = KvPersonRepository::new(SqliteKeyValueStore::try_new(&conn).expect("migrated connection should be accepted"));
        let (mut store, warning) = PersonStore::open(repo);
        assert!(warning.is_none());
        store
            .add(&PersonDraft::new("Eva", "Klein", "01.01.2000", Avatar::Student))
            .expect("valid draft should be added");
        store.remove(3).expect("seed id 3 should be removed");
    }

    let conn = open_db(&path).expect("db file should open");
    let repo = KvPersonRepository::new(SqliteKeyValueStore::try_new(&conn).expect("migrated connection should be accepted"));
    let (store, warning) = PersonStore::open(repo);
    assert!(warning.is_none());
    let ids: Vec<_> = store.persons().iter().map(|person| person.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 5, 6]);
    assert_eq!(store.find_by_id(6).expect("added record should survive reopen").avatar, Avatar::Student);
}

#[test]
fn malformed_value_in_database_falls_back_to_seed() {
    let conn = open_db_in_memory().expect("in-memory db should open");
    let kv = SqliteKeyValueStore::try_new(&conn).expect("migrated connection should be accepted");
    kv.set(PERSONS_KEY, r#"[{"id":"one"}]"#)
        .expect("raw value should be written");

    let (store, warning) = PersonStore::open(KvPersonRepository::new(kv));
    assert!(matches!(warning, Some(StartupWarning::MalformedData(_))));
    assert_eq!(store.persons(), seed_persons().as_slice());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .expect("user_version should be readable")
}
