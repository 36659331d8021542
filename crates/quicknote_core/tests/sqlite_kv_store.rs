use quicknote_core::db::migrations::latest_version;
use quicknote_core::db::open_db;
use quicknote_core::{
    KeyValueStore, KvError, NoteInput, NoteRepository, PreferenceStore, SqliteKvStore, ViewMode,
};
use rusqlite::Connection;

#[test]
fn open_in_memory_applies_all_migrations() {
    let kv = SqliteKvStore::open_in_memory().unwrap();
    let conn = kv.into_inner();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn get_set_remove_follow_the_store_contract() {
    let kv = SqliteKvStore::open_in_memory().unwrap();

    assert_eq!(kv.get("missing").unwrap(), None);
    kv.remove("missing").unwrap();

    kv.set("k", "one").unwrap();
    kv.set("k", "two").unwrap();
    assert_eq!(kv.get("k").unwrap().as_deref(), Some("two"));

    kv.remove("k").unwrap();
    assert_eq!(kv.get("k").unwrap(), None);
}

#[test]
fn notes_and_preferences_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quicknote.sqlite3");

    let created = {
        let kv = SqliteKvStore::open(&path).unwrap();
        let mut repo = NoteRepository::open(&kv);
        let note = repo
            .create(&NoteInput::new("Persisted", "on disk", "durable"))
            .unwrap();
        PreferenceStore::new(&kv).save(ViewMode::List).unwrap();
        note
    };

    let kv = SqliteKvStore::open(&path).unwrap();
    let repo = NoteRepository::open(&kv);
    assert_eq!(repo.notes(), std::slice::from_ref(&created));
    assert_eq!(PreferenceStore::new(&kv).load(), ViewMode::List);
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKvStore::try_new(conn).err().unwrap();
    assert!(matches!(err, KvError::MissingRequiredTable("kv_entries")));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        KvError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = SqliteKvStore::open(&path).err().unwrap();
    assert!(matches!(err, KvError::UnsupportedSchemaVersion { .. }));
}

#[test]
fn sqlite_failures_surface_as_store_errors() {
    let kv = SqliteKvStore::open_in_memory().unwrap();
    let conn = kv.into_inner();
    conn.execute_batch("DROP TABLE kv_entries;").unwrap();
    let err = SqliteKvStore::try_new(conn).err().unwrap();
    assert!(matches!(err, KvError::MissingRequiredTable("kv_entries")));

    let dir = tempfile::tempdir().unwrap();
    let err = open_db(dir.path()).unwrap_err();
    assert!(matches!(err, KvError::Sqlite(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quicknote.sqlite3");

    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
