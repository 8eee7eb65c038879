//! SQLite-backed host store.
//!
//! # Responsibility
//! - Persist collections and their documents for hosts without a live object graph.
//! - Expose stored rows through the host capability traits in `source`.
//!
//! # Invariants
//! - Only active (`is_deleted=0`) rows are visible to aggregation.
//! - Listing order is deterministic: `sort_order ASC, uuid ASC`.

pub mod collection_store;
