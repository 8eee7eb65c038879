//! Collection store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/touch/delete APIs over `collections` and `documents`.
//! - Serve stored rows as `HostCollectionSource` handles.
//!
//! # Invariants
//! - Collection names are non-blank after trimming.
//! - Documents always belong to an active collection at creation time.
//! - Read paths reject invalid persisted ids instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::EpochMs;
use crate::source::{CollectionHandle, DocumentHandle, HostCollectionSource, SourceResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable collection identifier.
pub type CollectionId = Uuid;
/// Stable stored-document identifier.
pub type StoredDocumentId = Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from collection store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Collection name is empty after trimming.
    EmptyCollectionName,
    /// Target collection does not exist or is soft-deleted.
    CollectionNotFound(CollectionId),
    /// Target document does not exist or is soft-deleted.
    DocumentNotFound(StoredDocumentId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::EmptyCollectionName => write!(f, "collection name must not be empty"),
            Self::CollectionNotFound(id) => write!(f, "collection not found: {id}"),
            Self::DocumentNotFound(id) => write!(f, "document not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "collection store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "collection store requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid collection store data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Stored collection row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCollection {
    pub collection_uuid: CollectionId,
    pub name: String,
    pub icon_id: Option<String>,
    pub sort_order: i64,
}

/// Stored document row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub document_uuid: StoredDocumentId,
    pub collection_uuid: CollectionId,
    pub title: String,
    /// `None` when the host never recorded a modification.
    pub modified_at: Option<EpochMs>,
    pub sort_order: i64,
}

/// Repository interface for the collection store.
pub trait CollectionStore {
    /// Creates one collection appended after existing ones.
    fn create_collection(&self, name: &str, icon_id: Option<&str>)
        -> StoreResult<StoredCollection>;
    /// Creates one document appended at the end of its collection.
    fn create_document(
        &self,
        collection_uuid: CollectionId,
        title: &str,
        modified_at: Option<EpochMs>,
    ) -> StoreResult<StoredDocument>;
    /// Records a new modification instant for one document.
    fn touch_document(
        &self,
        document_uuid: StoredDocumentId,
        modified_at: EpochMs,
    ) -> StoreResult<()>;
    /// Soft-deletes one document.
    fn soft_delete_document(&self, document_uuid: StoredDocumentId) -> StoreResult<()>;
    /// Soft-deletes one collection; its documents become invisible with it.
    fn soft_delete_collection(&self, collection_uuid: CollectionId) -> StoreResult<()>;
    /// Lists active collections.
    fn list_stored_collections(&self) -> StoreResult<Vec<StoredCollection>>;
    /// Lists active documents of one collection.
    fn list_stored_documents(
        &self,
        collection_uuid: CollectionId,
    ) -> StoreResult<Vec<StoredDocument>>;
}

/// SQLite-backed collection store.
pub struct SqliteCollectionStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCollectionStore<'conn> {
    /// Creates a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CollectionStore for SqliteCollectionStore<'_> {
    fn create_collection(
        &self,
        name: &str,
        icon_id: Option<&str>,
    ) -> StoreResult<StoredCollection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyCollectionName);
        }

        let collection_uuid = Uuid::new_v4();
        let sort_order: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM collections;",
            [],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "INSERT INTO collections (
                collection_uuid,
                name,
                icon_id,
                sort_order,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, 0);",
            params![collection_uuid.to_string(), name, icon_id, sort_order],
        )?;

        Ok(StoredCollection {
            collection_uuid,
            name: name.to_string(),
            icon_id: icon_id.map(str::to_string),
            sort_order,
        })
    }

    fn create_document(
        &self,
        collection_uuid: CollectionId,
        title: &str,
        modified_at: Option<EpochMs>,
    ) -> StoreResult<StoredDocument> {
        if !collection_is_active(self.conn, collection_uuid)? {
            return Err(StoreError::CollectionNotFound(collection_uuid));
        }

        let document_uuid = Uuid::new_v4();
        let sort_order: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(sort_order), -1) + 1
             FROM documents
             WHERE collection_uuid = ?1;",
            [collection_uuid.to_string()],
            |row| row.get(0),
        )?;
        self.conn.execute(
            "INSERT INTO documents (
                document_uuid,
                collection_uuid,
                title,
                modified_at,
                sort_order,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, 0);",
            params![
                document_uuid.to_string(),
                collection_uuid.to_string(),
                title,
                modified_at,
                sort_order,
            ],
        )?;

        Ok(StoredDocument {
            document_uuid,
            collection_uuid,
            title: title.to_string(),
            modified_at,
            sort_order,
        })
    }

    fn touch_document(
        &self,
        document_uuid: StoredDocumentId,
        modified_at: EpochMs,
    ) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE documents
             SET modified_at = ?2
             WHERE document_uuid = ?1
               AND is_deleted = 0;",
            params![document_uuid.to_string(), modified_at],
        )?;
        if changed == 0 {
            return Err(StoreError::DocumentNotFound(document_uuid));
        }
        Ok(())
    }

    fn soft_delete_document(&self, document_uuid: StoredDocumentId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE documents
             SET is_deleted = 1
             WHERE document_uuid = ?1
               AND is_deleted = 0;",
            [document_uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::DocumentNotFound(document_uuid));
        }
        Ok(())
    }

    fn soft_delete_collection(&self, collection_uuid: CollectionId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE collections
             SET is_deleted = 1,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE collection_uuid = ?1
               AND is_deleted = 0;",
            [collection_uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::CollectionNotFound(collection_uuid));
        }
        Ok(())
    }

    fn list_stored_collections(&self) -> StoreResult<Vec<StoredCollection>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                collection_uuid,
                name,
                icon_id,
                sort_order
             FROM collections
             WHERE is_deleted = 0
             ORDER BY sort_order ASC, collection_uuid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_collection_row(row)?);
        }
        Ok(items)
    }

    fn list_stored_documents(
        &self,
        collection_uuid: CollectionId,
    ) -> StoreResult<Vec<StoredDocument>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                d.document_uuid AS document_uuid,
                d.collection_uuid AS collection_uuid,
                d.title AS title,
                d.modified_at AS modified_at,
                d.sort_order AS sort_order
             FROM documents d
             JOIN collections c ON c.collection_uuid = d.collection_uuid
             WHERE d.collection_uuid = ?1
               AND d.is_deleted = 0
               AND c.is_deleted = 0
             ORDER BY d.sort_order ASC, d.document_uuid ASC;",
        )?;
        let mut rows = stmt.query([collection_uuid.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_document_row(row)?);
        }
        Ok(items)
    }
}

impl HostCollectionSource for SqliteCollectionStore<'_> {
    fn list_collections(&self) -> SourceResult<Vec<Box<dyn CollectionHandle + '_>>> {
        let collections = self.list_stored_collections()?;
        Ok(collections
            .into_iter()
            .map(|record| {
                Box::new(SqliteCollectionHandle { store: self, record })
                    as Box<dyn CollectionHandle + '_>
            })
            .collect())
    }
}

/// Live handle over one stored collection.
struct SqliteCollectionHandle<'s, 'conn> {
    store: &'s SqliteCollectionStore<'conn>,
    record: StoredCollection,
}

impl CollectionHandle for SqliteCollectionHandle<'_, '_> {
    fn name(&self) -> &str {
        &self.record.name
    }

    fn icon_id(&self) -> Option<&str> {
        self.record.icon_id.as_deref()
    }

    fn list_documents(&self) -> SourceResult<Vec<Box<dyn DocumentHandle + '_>>> {
        let documents = self
            .store
            .list_stored_documents(self.record.collection_uuid)?;
        Ok(documents
            .into_iter()
            .map(|record| {
                Box::new(SqliteDocumentHandle {
                    id: record.document_uuid.to_string(),
                    record,
                }) as Box<dyn DocumentHandle + '_>
            })
            .collect())
    }
}

struct SqliteDocumentHandle {
    // Hyphenated form of `record.document_uuid`, handed to navigation.
    id: String,
    record: StoredDocument,
}

impl DocumentHandle for SqliteDocumentHandle {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.record.title
    }

    fn modified_at(&self) -> Option<EpochMs> {
        self.record.modified_at
    }
}

fn collection_is_active(conn: &Connection, collection_uuid: CollectionId) -> StoreResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM collections WHERE collection_uuid = ?1 AND is_deleted = 0;",
            [collection_uuid.to_string()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn parse_collection_row(row: &Row<'_>) -> StoreResult<StoredCollection> {
    Ok(StoredCollection {
        collection_uuid: parse_uuid(row, "collection_uuid", "collections.collection_uuid")?,
        name: row.get("name")?,
        icon_id: row.get("icon_id")?,
        sort_order: row.get("sort_order")?,
    })
}

fn parse_document_row(row: &Row<'_>) -> StoreResult<StoredDocument> {
    Ok(StoredDocument {
        document_uuid: parse_uuid(row, "document_uuid", "documents.document_uuid")?,
        collection_uuid: parse_uuid(row, "collection_uuid", "documents.collection_uuid")?,
        title: row.get("title")?,
        modified_at: row.get("modified_at")?,
        sort_order: row.get("sort_order")?,
    })
}

fn parse_uuid(row: &Row<'_>, column: &str, qualified: &str) -> StoreResult<Uuid> {
    let raw: String = row.get(column)?;
    Uuid::parse_str(&raw)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{raw}` in {qualified}")))
}

fn ensure_store_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["collections", "documents"] {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
