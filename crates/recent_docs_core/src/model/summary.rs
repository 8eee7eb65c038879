//! Ranked recent-item summary.

use crate::model::{DocumentId, EpochMs};
use crate::source::{CollectionHandle, DocumentHandle};
use serde::{Deserialize, Serialize};

/// One dated document, tagged with its owning collection.
///
/// Only documents that expose a modification timestamp reach this stage, so
/// `modified_at` is not optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentItemSummary {
    pub document_id: DocumentId,
    pub title: String,
    pub collection_name: String,
    pub collection_icon: Option<String>,
    pub modified_at: EpochMs,
}

impl RecentItemSummary {
    /// Builds a summary from host handles.
    ///
    /// Returns `None` when the document has no modification timestamp.
    pub fn from_handles<C, D>(collection: &C, document: &D) -> Option<Self>
    where
        C: CollectionHandle + ?Sized,
        D: DocumentHandle + ?Sized,
    {
        let modified_at = document.modified_at()?;
        Some(Self {
            document_id: document.id().to_string(),
            title: document.title().to_string(),
            collection_name: collection.name().to_string(),
            collection_icon: collection.icon_id().map(str::to_string),
            modified_at,
        })
    }
}
