//! Plugin manifest declaration and validation.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable id of the built-in recent documents plugin.
pub const BUILTIN_PLUGIN_ID: &str = "builtin.recent_docs";

/// Sidebar entry declared by the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntrySpec {
    /// User-facing label, e.g. `Recent files`.
    pub label: String,
    /// Symbolic icon reference resolved by the host.
    pub icon_id: Option<String>,
    pub tooltip: Option<String>,
}

/// Declarative plugin manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginManifest {
    /// Stable plugin identifier, e.g. `builtin.recent_docs`.
    pub id: String,
    /// Semantic version string (`major.minor.patch`).
    pub version: String,
    pub sidebar: SidebarEntrySpec,
}

impl PluginManifest {
    /// Manifest of the built-in plugin, versioned with this crate.
    pub fn builtin() -> Self {
        Self {
            id: BUILTIN_PLUGIN_ID.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            sidebar: SidebarEntrySpec {
                label: "Recent files".to_string(),
                icon_id: Some("clock".to_string()),
                tooltip: Some("Show recently modified documents".to_string()),
            },
        }
    }

    /// Checks id, version and sidebar entry before the host sees them.
    ///
    /// Ids are dot-separated lowercase segments (`builtin.recent_docs`);
    /// versions are plain `major.minor.patch`.
    pub fn validate(&self) -> Result<(), ManifestValidationError> {
        if !is_plugin_id(self.id.trim()) {
            return Err(ManifestValidationError::Id(self.id.clone()));
        }
        if !is_release_version(self.version.trim()) {
            return Err(ManifestValidationError::Version(self.version.clone()));
        }
        if self.sidebar.label.trim().is_empty() {
            return Err(ManifestValidationError::SidebarLabel);
        }
        if self
            .sidebar
            .icon_id
            .as_deref()
            .is_some_and(|icon| icon.trim().is_empty())
        {
            return Err(ManifestValidationError::SidebarIcon);
        }
        Ok(())
    }
}

fn is_plugin_id(value: &str) -> bool {
    let lower_alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    value.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars.next().is_some_and(lower_alnum)
            && chars.all(|c| lower_alnum(c) || c == '_' || c == '-')
    })
}

fn is_release_version(value: &str) -> bool {
    let numeric = |part: Option<&str>| {
        part.is_some_and(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
    };
    let mut parts = value.split('.');
    numeric(parts.next()) && numeric(parts.next()) && numeric(parts.next()) && parts.next().is_none()
}

/// Manifest validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestValidationError {
    /// Offending id; blank ids land here too.
    Id(String),
    /// Offending version string.
    Version(String),
    SidebarLabel,
    SidebarIcon,
}

impl Display for ManifestValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "plugin id `{id}` is not a lowercase dotted name"),
            Self::Version(version) => {
                write!(f, "plugin version `{version}` is not major.minor.patch")
            }
            Self::SidebarLabel => write!(f, "sidebar entry needs a label"),
            Self::SidebarIcon => write!(f, "sidebar icon must be absent or non-blank"),
        }
    }
}

impl Error for ManifestValidationError {}

#[cfg(test)]
mod tests {
    use super::{ManifestValidationError, PluginManifest, BUILTIN_PLUGIN_ID};

    fn with<F: FnOnce(&mut PluginManifest)>(edit: F) -> Result<(), ManifestValidationError> {
        let mut manifest = PluginManifest::builtin();
        edit(&mut manifest);
        manifest.validate()
    }

    #[test]
    fn builtin_manifest_is_valid() {
        let manifest = PluginManifest::builtin();
        assert_eq!(manifest.id, BUILTIN_PLUGIN_ID);
        assert_eq!(manifest.validate(), Ok(()));
    }

    #[test]
    fn ids_must_be_lowercase_dotted_segments() {
        for bad in ["", "  ", "Recent Docs", "recent..docs", ".recent", "recent.", "_x.y"] {
            assert_eq!(
                with(|m| m.id = bad.to_string()),
                Err(ManifestValidationError::Id(bad.to_string())),
                "{bad:?}"
            );
        }
        assert_eq!(with(|m| m.id = "acme.recent-docs_2".to_string()), Ok(()));
    }

    #[test]
    fn versions_must_be_numeric_triplets() {
        for bad in ["", "v1", "1.2", "1.2.3.4", "1..3", "1.2.x"] {
            assert!(matches!(
                with(|m| m.version = bad.to_string()),
                Err(ManifestValidationError::Version(_))
            ));
        }
        assert_eq!(with(|m| m.version = " 10.0.12 ".to_string()), Ok(()));
    }

    #[test]
    fn sidebar_fields_must_not_be_blank() {
        assert_eq!(
            with(|m| m.sidebar.icon_id = Some(" ".to_string())),
            Err(ManifestValidationError::SidebarIcon)
        );
        assert_eq!(with(|m| m.sidebar.icon_id = None), Ok(()));
        assert_eq!(
            with(|m| m.sidebar.label = String::new()),
            Err(ManifestValidationError::SidebarLabel)
        );
    }
}
