//! Core error taxonomy surfaced to callers and the rendering layer.
//!
//! # Invariants
//! - Aggregation never returns a partial list; a host fault is one
//!   `SourceUnavailable` error.
//! - Navigation failures are reported, never retried.

use crate::model::DocumentId;
use crate::source::{NavigationError, SourceError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RecentResult<T> = Result<T, RecentError>;

#[derive(Debug)]
pub enum RecentError {
    /// Listing collections (`collection=None`) or one collection's documents failed.
    SourceUnavailable {
        collection: Option<String>,
        cause: SourceError,
    },
    /// Host could not open the selected document.
    NavigationFailed {
        document_id: DocumentId,
        cause: NavigationError,
    },
}

impl RecentError {
    /// Stable machine-readable code used in diagnostics events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "source_unavailable",
            Self::NavigationFailed { .. } => "navigation_failed",
        }
    }
}

impl Display for RecentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnavailable {
                collection: Some(name),
                cause,
            } => write!(f, "collection `{name}` is unavailable: {cause}"),
            Self::SourceUnavailable {
                collection: None,
                cause,
            } => write!(f, "collections are unavailable: {cause}"),
            Self::NavigationFailed { document_id, cause } => {
                write!(f, "failed to open document `{document_id}`: {cause}")
            }
        }
    }
}

impl Error for RecentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SourceUnavailable { cause, .. } => Some(cause),
            Self::NavigationFailed { cause, .. } => Some(cause),
        }
    }
}
