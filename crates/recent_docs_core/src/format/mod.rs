//! Human-facing text formatting.

pub mod relative_time;
