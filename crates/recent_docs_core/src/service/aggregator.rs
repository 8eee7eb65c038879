//! Recent-item aggregation over every host collection.
//!
//! # Responsibility
//! - Walk all collections, keep dated documents, rank them globally.
//!
//! # Invariants
//! - Output is sorted by `modified_at` non-increasing.
//! - Equal timestamps keep discovery order (collection order, then document order).
//! - Output length is at most `max_items`; non-positive bounds yield an empty list.
//! - Any host fault fails the whole call; partial lists are never returned.
//!
//! Every call materializes all documents (O(total documents) time and space).
//! Calls are user-initiated and rare, so no incremental index is kept.

use crate::error::{RecentError, RecentResult};
use crate::model::summary::RecentItemSummary;
use crate::source::HostCollectionSource;
use log::{debug, error, info};
use std::time::Instant;

/// Ranks dated documents across all collections of one host source.
pub struct RecentAggregator<S: HostCollectionSource> {
    source: S,
}

impl<S: HostCollectionSource> RecentAggregator<S> {
    /// Creates an aggregator over the provided host source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Collects the `max_items` most recently modified documents.
    ///
    /// # Errors
    /// - Returns `RecentError::SourceUnavailable` when listing collections or
    ///   any collection's documents fails.
    pub fn collect(&self, max_items: i64) -> RecentResult<Vec<RecentItemSummary>> {
        if max_items <= 0 {
            debug!("event=recent_collect module=aggregator status=skipped reason=non_positive_limit");
            return Ok(Vec::new());
        }
        let limit = usize::try_from(max_items).unwrap_or(usize::MAX);

        let started_at = Instant::now();
        info!("event=recent_collect module=aggregator status=start limit={limit}");

        let collections = self.source.list_collections().map_err(|cause| {
            error!(
                "event=recent_collect module=aggregator status=error duration_ms={} error_code=list_collections_failed error={}",
                started_at.elapsed().as_millis(),
                cause
            );
            RecentError::SourceUnavailable {
                collection: None,
                cause,
            }
        })?;

        let mut summaries = Vec::new();
        let mut scanned = 0usize;
        for (index, collection) in collections.iter().enumerate() {
            let documents = collection.list_documents().map_err(|cause| {
                error!(
                    "event=recent_collect module=aggregator status=error duration_ms={} error_code=list_documents_failed collection_index={} error={}",
                    started_at.elapsed().as_millis(),
                    index,
                    cause
                );
                RecentError::SourceUnavailable {
                    collection: Some(collection.name().to_string()),
                    cause,
                }
            })?;

            scanned += documents.len();
            summaries.extend(documents.iter().filter_map(|document| {
                RecentItemSummary::from_handles(&**collection, &**document)
            }));
        }

        let ranked = summaries.len();
        // `sort_by` is stable: equal timestamps keep discovery order.
        summaries.sort_by(|left, right| right.modified_at.cmp(&left.modified_at));
        summaries.truncate(limit);

        info!(
            "event=recent_collect module=aggregator status=ok duration_ms={} collections={} documents={} ranked={} returned={}",
            started_at.elapsed().as_millis(),
            collections.len(),
            scanned,
            ranked,
            summaries.len()
        );
        Ok(summaries)
    }
}
