//! Dart-facing recent list calls.
//!
//! Every export is a sync FRB call that returns plain data. Failures travel
//! inside `RecentListResponse` (`ok=false` plus a message) instead of
//! panicking across the boundary, so Dart can tell an empty list from a
//! failed load.

use recent_docs_core::db::open_db;
use recent_docs_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, now_epoch_ms,
    ping as ping_inner, present, HostCollectionSource, MemorySource, RecentAggregator,
    RecentSettings, SqliteCollectionStore, ViewItem,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const RECENT_DB_FILE_NAME: &str = "recent_docs.sqlite3";
static RECENT_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Bridge liveness probe; always `pong`.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Starts core file logging; returns `""` on success, else the reason.
///
/// Repeating the call with the same level and directory is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One row of the recent list as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentListItem {
    /// Opaque document id to hand back to the host navigator.
    pub document_id: String,
    pub title: String,
    /// `None` when the collection column is hidden.
    pub collection_label: Option<String>,
    pub age_label: String,
    pub icon_id: Option<String>,
}

/// Response envelope for recent list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentListResponse {
    /// Whether the list was loaded. `false` means `message` holds the error.
    pub ok: bool,
    pub items: Vec<RecentListItem>,
    /// Human-readable status for diagnostics/UI.
    pub message: String,
    /// Effective `maxFiles` used for the scan.
    pub applied_limit: u32,
}

impl RecentListResponse {
    fn failure(message: impl Into<String>, applied_limit: u32) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
            applied_limit,
        }
    }
}

/// Lists recently modified documents from the entry SQLite store.
///
/// `settings_json` carries `maxFiles` / `showCollection` (blank for defaults);
/// `now_epoch_ms` pins the reference instant, `None` means now.
#[flutter_rust_bridge::frb(sync)]
pub fn recent_list(settings_json: String, now_epoch_ms: Option<i64>) -> RecentListResponse {
    let settings = match RecentSettings::from_json(&settings_json) {
        Ok(settings) => settings,
        Err(err) => return RecentListResponse::failure(format!("recent_list failed: {err}"), 0),
    };

    let conn = match open_db(resolve_recent_db_path()) {
        Ok(conn) => conn,
        Err(err) => {
            return RecentListResponse::failure(
                format!("recent_list failed: {err}"),
                settings.max_files,
            )
        }
    };
    let store = match SqliteCollectionStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => {
            return RecentListResponse::failure(
                format!("recent_list failed: {err}"),
                settings.max_files,
            )
        }
    };

    list_from_source(&store, settings, now_epoch_ms)
}

/// Lists recently modified documents from a host-built JSON snapshot.
///
/// `snapshot_json` is an array of `{name, iconId?, documents: [{id, title?, modifiedAt?}]}`.
/// A malformed snapshot yields `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn recent_list_from_snapshot(
    snapshot_json: String,
    settings_json: String,
    now_epoch_ms: Option<i64>,
) -> RecentListResponse {
    let settings = match RecentSettings::from_json(&settings_json) {
        Ok(settings) => settings,
        Err(err) => {
            return RecentListResponse::failure(
                format!("recent_list_from_snapshot failed: {err}"),
                0,
            )
        }
    };
    // Decode failures surface through aggregation as `SourceUnavailable`.
    match MemorySource::from_json(&snapshot_json) {
        Ok(source) => list_from_source(&source, settings, now_epoch_ms),
        Err(err) => RecentListResponse::failure(
            format!("recent_list_from_snapshot failed: {err}"),
            settings.max_files,
        ),
    }
}

fn list_from_source(
    source: &impl HostCollectionSource,
    settings: RecentSettings,
    now: Option<i64>,
) -> RecentListResponse {
    let now = now.unwrap_or_else(now_epoch_ms);
    match RecentAggregator::new(source).collect(settings.max_items()) {
        Ok(summaries) => {
            let items = present(&summaries, now, settings.show_collection)
                .into_iter()
                .map(to_recent_list_item)
                .collect::<Vec<_>>();
            let message = match items.len() {
                0 => "No recent files.".to_string(),
                count => format!("{count} recent file(s)."),
            };
            RecentListResponse {
                ok: true,
                items,
                message,
                applied_limit: settings.max_files,
            }
        }
        Err(err) => {
            log::warn!(
                "event=recent_list module=ffi status=error error_code={}",
                err.code()
            );
            RecentListResponse::failure(format!("recent_list failed: {err}"), settings.max_files)
        }
    }
}

fn to_recent_list_item(item: ViewItem) -> RecentListItem {
    RecentListItem {
        document_id: item.document_id,
        title: item.title,
        collection_label: item.collection_label,
        age_label: item.age_label,
        icon_id: item.icon_id,
    }
}

fn resolve_recent_db_path() -> PathBuf {
    RECENT_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("RECENT_DOCS_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(RECENT_DB_FILE_NAME)
        })
        .clone()
}
