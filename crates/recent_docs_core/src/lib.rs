//! Recent documents core.
//!
//! Walks every host collection, ranks dated documents by modification time,
//! bounds the result and renders relative ages for display.

pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod plugin;
pub mod repo;
pub mod service;
pub mod settings;
pub mod source;

pub use error::{RecentError, RecentResult};
pub use format::relative_time::{now_epoch_ms, relative_label, relative_label_in, JUST_NOW};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::summary::RecentItemSummary;
pub use model::view_item::ViewItem;
pub use model::{DocumentId, EpochMs};
pub use plugin::manifest::{ManifestValidationError, PluginManifest, SidebarEntrySpec};
pub use plugin::popup::{
    DismissReason, ListenerGuard, ListenerId, PopupContent, PopupEvents, PopupListener,
    RecentPopup,
};
pub use plugin::sidebar::{SidebarEntryId, SidebarError, SidebarHost, SidebarRegistration};
pub use plugin::{PluginError, RecentDocsPlugin};
pub use repo::collection_store::{
    CollectionId, CollectionStore, SqliteCollectionStore, StoreError, StoreResult,
    StoredCollection, StoredDocument, StoredDocumentId,
};
pub use service::aggregator::RecentAggregator;
pub use service::presenter::{present, present_in, UNTITLED_PLACEHOLDER};
pub use settings::{RecentSettings, SettingsError, DEFAULT_MAX_FILES};
pub use source::{
    CollectionHandle, DocumentHandle, HostCollectionSource, MemoryCollection, MemoryDocument,
    MemorySource, NavigationError, Navigator, SourceError, SourceResult,
};

/// Minimal health-check API for host integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
