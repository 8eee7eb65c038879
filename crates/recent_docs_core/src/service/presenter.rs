//! Presentation adapter from ranked summaries to view items.
//!
//! # Invariants
//! - Input order is preserved exactly; ranking belongs to the aggregator.
//! - `collection_label` is set only when the caller asks to show collections.
//! - Titles are never empty in the output.

use crate::format::relative_time::relative_label_in;
use crate::model::summary::RecentItemSummary;
use crate::model::view_item::ViewItem;
use crate::model::EpochMs;
use chrono::{TimeZone, Utc};
use std::fmt::Display;

/// Title shown for documents whose title is empty or whitespace-only.
pub const UNTITLED_PLACEHOLDER: &str = "Untitled";

/// Builds view items with calendar-date labels in UTC.
pub fn present(
    summaries: &[RecentItemSummary],
    now: EpochMs,
    show_collection: bool,
) -> Vec<ViewItem> {
    present_in(summaries, now, show_collection, &Utc)
}

/// Builds view items with calendar-date labels in `tz`.
pub fn present_in<Tz>(
    summaries: &[RecentItemSummary],
    now: EpochMs,
    show_collection: bool,
    tz: &Tz,
) -> Vec<ViewItem>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    summaries
        .iter()
        .map(|summary| ViewItem {
            document_id: summary.document_id.clone(),
            title: display_title(&summary.title),
            collection_label: show_collection.then(|| summary.collection_name.clone()),
            age_label: relative_label_in(summary.modified_at, now, tz),
            icon_id: summary.collection_icon.clone(),
        })
        .collect()
}

fn display_title(title: &str) -> String {
    if title.trim().is_empty() {
        UNTITLED_PLACEHOLDER.to_string()
    } else {
        title.to_string()
    }
}
