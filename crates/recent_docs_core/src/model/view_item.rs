//! Display-ready record for the recent list surface.

use crate::model::DocumentId;
use serde::{Deserialize, Serialize};

/// One row of the rendered recent list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewItem {
    pub document_id: DocumentId,
    /// Never empty; falls back to a placeholder.
    pub title: String,
    /// Present only when the caller asked to show collection names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_label: Option<String>,
    pub age_label: String,
    pub icon_id: Option<String>,
}
