//! Flutter-facing bindings for the recent documents core.

pub mod api;
