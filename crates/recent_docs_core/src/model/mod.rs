//! Core-owned value types produced by aggregation and presentation.
//!
//! # Responsibility
//! - Define the ranked summary record built from host handles.
//! - Define the display-ready record consumed by the rendering surface.
//!
//! # Invariants
//! - Values are constructed fresh per call and never mutated afterwards.
//! - Instants are Unix epoch milliseconds.

pub mod summary;
pub mod view_item;

/// Unix epoch milliseconds.
pub type EpochMs = i64;

/// Opaque document identifier handed back to the host for navigation.
///
/// The core never parses or interprets it.
pub type DocumentId = String;
