//! Host capability contracts consumed by the aggregation core.
//!
//! # Responsibility
//! - Describe collections and documents as capability sets, decoupled from
//!   any concrete host object graph.
//! - Describe the navigation hand-off invoked after a user picks an item.
//!
//! # Invariants
//! - Handles are read-only to the core; no method here mutates host data.
//! - Host faults surface as `SourceError`, never as panics.

pub mod memory;

use crate::model::EpochMs;
use crate::repo::collection_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use memory::{MemoryCollection, MemoryDocument, MemorySource};

pub type SourceResult<T> = Result<T, SourceError>;

/// Host-side fault raised while listing collections or documents.
#[derive(Debug)]
pub enum SourceError {
    /// Host reported a failure with a human-readable reason.
    Host(String),
    /// Host handed over a snapshot that cannot be decoded.
    InvalidSnapshot(String),
    /// SQLite-backed store failure.
    Store(StoreError),
}

impl SourceError {
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host(message.into())
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host(message) => write!(f, "{message}"),
            Self::InvalidSnapshot(message) => write!(f, "invalid collection snapshot: {message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Host(_) | Self::InvalidSnapshot(_) => None,
        }
    }
}

impl From<StoreError> for SourceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// One document exposed by a collection.
pub trait DocumentHandle {
    /// Opaque stable identifier used for navigation.
    fn id(&self) -> &str;
    /// Display title; may be empty.
    fn title(&self) -> &str;
    /// Last modification instant, if the host tracks one.
    fn modified_at(&self) -> Option<EpochMs>;
}

/// One logical group of documents.
pub trait CollectionHandle {
    fn name(&self) -> &str;
    fn icon_id(&self) -> Option<&str>;
    /// Lists every document of this collection in host order.
    fn list_documents(&self) -> SourceResult<Vec<Box<dyn DocumentHandle + '_>>>;
}

/// Entry point listing every collection the host knows about.
pub trait HostCollectionSource {
    /// Lists all collections in host order, without filtering or paging.
    fn list_collections(&self) -> SourceResult<Vec<Box<dyn CollectionHandle + '_>>>;
}

impl<D: DocumentHandle + ?Sized> DocumentHandle for &D {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn modified_at(&self) -> Option<EpochMs> {
        (**self).modified_at()
    }
}

impl<C: CollectionHandle + ?Sized> CollectionHandle for &C {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn icon_id(&self) -> Option<&str> {
        (**self).icon_id()
    }

    fn list_documents(&self) -> SourceResult<Vec<Box<dyn DocumentHandle + '_>>> {
        (**self).list_documents()
    }
}

impl<S: HostCollectionSource + ?Sized> HostCollectionSource for &S {
    fn list_collections(&self) -> SourceResult<Vec<Box<dyn CollectionHandle + '_>>> {
        (**self).list_collections()
    }
}

/// Failure reported by the host when opening a selected document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Host could not resolve the identifier to a document.
    DocumentMissing(String),
    /// Host refused or failed to open the document.
    Rejected(String),
}

impl Display for NavigationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentMissing(id) => write!(f, "document not found: {id}"),
            Self::Rejected(message) => write!(f, "{message}"),
        }
    }
}

impl Error for NavigationError {}

/// Host collaborator that opens a document by identifier.
pub trait Navigator {
    fn open(&self, document_id: &str) -> Result<(), NavigationError>;
}
