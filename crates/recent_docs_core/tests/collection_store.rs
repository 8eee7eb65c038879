use recent_docs_core::db::migrations::latest_version;
use recent_docs_core::db::{open_db, open_db_in_memory, DbError};
use recent_docs_core::{
    CollectionStore, HostCollectionSource, RecentAggregator, SqliteCollectionStore, StoreError,
};
use rusqlite::Connection;
use uuid::Uuid;

const NOW: i64 = 1_718_452_800_000;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "collections");
    assert_table_exists(&conn, "documents");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recent.db");

    let conn_first = open_db(&path).unwrap();
    {
        let store = SqliteCollectionStore::try_new(&conn_first).unwrap();
        store.create_collection("Notes", None).unwrap();
    }
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let store = SqliteCollectionStore::try_new(&conn_second).unwrap();
    assert_eq!(store.list_stored_collections().unwrap().len(), 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteCollectionStore::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        StoreError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn collections_and_documents_list_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCollectionStore::try_new(&conn).unwrap();

    let notes = store.create_collection("  Notes ", Some("note")).unwrap();
    let tasks = store.create_collection("Tasks", None).unwrap();
    assert_eq!(notes.name, "Notes");
    assert_eq!(tasks.sort_order, notes.sort_order + 1);

    let first = store.create_document(notes.collection_uuid, "First", Some(NOW)).unwrap();
    let second = store.create_document(notes.collection_uuid, "", None).unwrap();

    let collections = store.list_stored_collections().unwrap();
    let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Notes", "Tasks"]);

    let documents = store.list_stored_documents(notes.collection_uuid).unwrap();
    assert_eq!(documents, vec![first, second]);
    assert!(store
        .list_stored_documents(tasks.collection_uuid)
        .unwrap()
        .is_empty());
}

#[test]
fn create_collection_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCollectionStore::try_new(&conn).unwrap();
    let err = store.create_collection("   ", None).unwrap_err();
    assert!(matches!(err, StoreError::EmptyCollectionName));
}

#[test]
fn create_document_requires_active_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCollectionStore::try_new(&conn).unwrap();

    let missing = Uuid::new_v4();
    let err = store.create_document(missing, "orphan", Some(NOW)).unwrap_err();
    assert!(matches!(err, StoreError::CollectionNotFound(id) if id == missing));

    let notes = store.create_collection("Notes", None).unwrap();
    store.soft_delete_collection(notes.collection_uuid).unwrap();
    let err = store
        .create_document(notes.collection_uuid, "late", Some(NOW))
        .unwrap_err();
    assert!(matches!(err, StoreError::CollectionNotFound(_)));
}

#[test]
fn touch_and_delete_report_missing_documents() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCollectionStore::try_new(&conn).unwrap();
    let missing = Uuid::new_v4();

    assert!(matches!(
        store.touch_document(missing, NOW).unwrap_err(),
        StoreError::DocumentNotFound(_)
    ));
    assert!(matches!(
        store.soft_delete_document(missing).unwrap_err(),
        StoreError::DocumentNotFound(_)
    ));
}

#[test]
fn store_serves_as_host_source_for_aggregation() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCollectionStore::try_new(&conn).unwrap();

    let notes = store.create_collection("Notes", Some("note")).unwrap();
    let journal = store.create_collection("Journal", Some("book")).unwrap();
    let old = store
        .create_document(notes.collection_uuid, "Old", Some(NOW - 10_000))
        .unwrap();
    store.create_document(notes.collection_uuid, "Undated", None).unwrap();
    let entry = store
        .create_document(journal.collection_uuid, "Entry", Some(NOW - 5_000))
        .unwrap();

    let aggregator = RecentAggregator::new(&store);
    let items = aggregator.collect(10).unwrap();
    let ids: Vec<String> = items.iter().map(|item| item.document_id.clone()).collect();
    assert_eq!(
        ids,
        vec![entry.document_uuid.to_string(), old.document_uuid.to_string()]
    );
    assert_eq!(items[0].collection_name, "Journal");
    assert_eq!(items[0].collection_icon.as_deref(), Some("book"));

    store.touch_document(old.document_uuid, NOW).unwrap();
    let items = aggregator.collect(10).unwrap();
    assert_eq!(items[0].document_id, old.document_uuid.to_string());
    assert_eq!(items[0].modified_at, NOW);
}

#[test]
fn soft_deleted_rows_are_invisible_to_aggregation() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCollectionStore::try_new(&conn).unwrap();

    let notes = store.create_collection("Notes", None).unwrap();
    let trash = store.create_collection("Trash", None).unwrap();
    let kept = store.create_document(notes.collection_uuid, "Kept", Some(NOW)).unwrap();
    let removed = store
        .create_document(notes.collection_uuid, "Removed", Some(NOW))
        .unwrap();
    store.create_document(trash.collection_uuid, "Binned", Some(NOW)).unwrap();

    store.soft_delete_document(removed.document_uuid).unwrap();
    store.soft_delete_collection(trash.collection_uuid).unwrap();

    assert_eq!(store.list_collections().unwrap().len(), 1);
    let items = RecentAggregator::new(&store).collect(10).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].document_id, kept.document_uuid.to_string());
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
