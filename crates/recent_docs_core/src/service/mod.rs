//! Use-case services for recent-item ranking and presentation.
//!
//! # Responsibility
//! - Aggregate host collections into one ranked, bounded list.
//! - Turn ranked summaries into display-ready view items.
//!
//! # Invariants
//! - Services are pure reads over host data; nothing is cached between calls.

pub mod aggregator;
pub mod presenter;
