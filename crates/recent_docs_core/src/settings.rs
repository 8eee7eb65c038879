//! Read-only plugin settings supplied by the host.
//!
//! # Invariants
//! - `max_files` is always positive after normalization.
//! - Unknown keys in host settings are ignored; missing keys use defaults.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default bound on the recent list length.
pub const DEFAULT_MAX_FILES: u32 = 15;
/// Collection names are shown unless the host disables them.
pub const DEFAULT_SHOW_COLLECTION: bool = true;

/// Effective recent-list settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentSettings {
    pub max_files: u32,
    pub show_collection: bool,
}

impl Default for RecentSettings {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            show_collection: DEFAULT_SHOW_COLLECTION,
        }
    }
}

/// Wire shape of host settings, before normalization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    #[serde(default)]
    max_files: Option<i64>,
    #[serde(default)]
    show_collection: Option<bool>,
}

impl RecentSettings {
    /// Parses host settings JSON (`{"maxFiles": 15, "showCollection": true}`).
    ///
    /// Blank input yields defaults.
    ///
    /// # Errors
    /// - Returns `SettingsError::Malformed` for invalid JSON or value types.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed: RawSettings =
            serde_json::from_str(raw).map_err(|err| SettingsError::Malformed(err.to_string()))?;
        Ok(Self {
            max_files: normalize_max_files(parsed.max_files),
            show_collection: parsed.show_collection.unwrap_or(DEFAULT_SHOW_COLLECTION),
        })
    }

    /// Bound passed to `RecentAggregator::collect`.
    pub fn max_items(&self) -> i64 {
        i64::from(self.max_files)
    }
}

/// Maps missing or non-positive values to the default and saturates large ones.
pub fn normalize_max_files(value: Option<i64>) -> u32 {
    match value {
        None => DEFAULT_MAX_FILES,
        Some(value) if value <= 0 => DEFAULT_MAX_FILES,
        Some(value) => u32::try_from(value).unwrap_or(u32::MAX),
    }
}

/// Host settings decode errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    Malformed(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed recent settings: {message}"),
        }
    }
}

impl Error for SettingsError {}
