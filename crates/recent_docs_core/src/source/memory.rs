//! In-memory collection snapshot source.
//!
//! Lets a host hand over a plain snapshot (for example JSON built on the UI
//! side) instead of exposing live handles.

use crate::model::EpochMs;
use crate::source::{
    CollectionHandle, DocumentHandle, HostCollectionSource, SourceError, SourceResult,
};
use serde::{Deserialize, Serialize};

/// Snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryDocument {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub modified_at: Option<EpochMs>,
}

impl MemoryDocument {
    pub fn new(id: impl Into<String>, title: impl Into<String>, modified_at: Option<EpochMs>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            modified_at,
        }
    }
}

impl DocumentHandle for MemoryDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn modified_at(&self) -> Option<EpochMs> {
        self.modified_at
    }
}

/// Snapshot collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryCollection {
    pub name: String,
    #[serde(default)]
    pub icon_id: Option<String>,
    #[serde(default)]
    pub documents: Vec<MemoryDocument>,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_id: None,
            documents: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon_id: impl Into<String>) -> Self {
        self.icon_id = Some(icon_id.into());
        self
    }

    pub fn with_document(mut self, document: MemoryDocument) -> Self {
        self.documents.push(document);
        self
    }
}

impl CollectionHandle for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn icon_id(&self) -> Option<&str> {
        self.icon_id.as_deref()
    }

    fn list_documents(&self) -> SourceResult<Vec<Box<dyn DocumentHandle + '_>>> {
        Ok(self
            .documents
            .iter()
            .map(|document| Box::new(document) as Box<dyn DocumentHandle + '_>)
            .collect())
    }
}

/// Ordered snapshot of every collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemorySource {
    pub collections: Vec<MemoryCollection>,
}

impl MemorySource {
    pub fn new(collections: Vec<MemoryCollection>) -> Self {
        Self { collections }
    }

    /// Decodes a JSON array of collections.
    ///
    /// # Errors
    /// - Returns `SourceError::InvalidSnapshot` for malformed JSON or shapes.
    pub fn from_json(raw: &str) -> SourceResult<Self> {
        serde_json::from_str(raw).map_err(|err| SourceError::InvalidSnapshot(err.to_string()))
    }
}

impl HostCollectionSource for MemorySource {
    fn list_collections(&self) -> SourceResult<Vec<Box<dyn CollectionHandle + '_>>> {
        Ok(self
            .collections
            .iter()
            .map(|collection| Box::new(collection) as Box<dyn CollectionHandle + '_>)
            .collect())
    }
}
