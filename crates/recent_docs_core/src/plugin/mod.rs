//! Host plugin lifecycle for the recent documents list.
//!
//! # Responsibility
//! - Validate the plugin manifest and own the sidebar entry while loaded.
//! - Hand out popups bound to the plugin settings.
//!
//! # Invariants
//! - The sidebar entry is registered on load and removed on unload or drop.
//! - No process-wide plugin state exists; the loaded plugin is an owned value.

pub mod manifest;
pub mod popup;
pub mod sidebar;

use crate::plugin::manifest::{ManifestValidationError, PluginManifest};
use crate::plugin::popup::{PopupEvents, RecentPopup};
use crate::plugin::sidebar::{SidebarEntryId, SidebarError, SidebarHost, SidebarRegistration};
use crate::settings::RecentSettings;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Plugin load errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    InvalidManifest(ManifestValidationError),
    Sidebar(SidebarError),
}

impl Display for PluginError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidManifest(err) => write!(f, "invalid plugin manifest: {err}"),
            Self::Sidebar(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PluginError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidManifest(err) => Some(err),
            Self::Sidebar(err) => Some(err),
        }
    }
}

/// Loaded recent documents plugin.
pub struct RecentDocsPlugin<'h, H: SidebarHost + ?Sized> {
    manifest: PluginManifest,
    settings: RecentSettings,
    sidebar: SidebarRegistration<'h, H>,
}

impl<'h, H: SidebarHost + ?Sized> RecentDocsPlugin<'h, H> {
    /// Validates `manifest` and registers its sidebar entry on `host`.
    pub fn load(
        host: &'h H,
        manifest: PluginManifest,
        settings: RecentSettings,
    ) -> Result<Self, PluginError> {
        manifest.validate().map_err(PluginError::InvalidManifest)?;
        let sidebar =
            SidebarRegistration::register(host, &manifest.sidebar).map_err(PluginError::Sidebar)?;
        info!(
            "event=plugin_load module=plugin status=ok plugin_id={} version={} max_files={} show_collection={}",
            manifest.id, manifest.version, settings.max_files, settings.show_collection
        );
        Ok(Self {
            manifest,
            settings,
            sidebar,
        })
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    pub fn settings(&self) -> RecentSettings {
        self.settings
    }

    pub fn sidebar_entry_id(&self) -> Option<SidebarEntryId> {
        self.sidebar.entry_id()
    }

    /// Creates a closed popup bound to this plugin's settings.
    pub fn popup<'e, E: PopupEvents + ?Sized>(&self, events: &'e E) -> RecentPopup<'e, E> {
        RecentPopup::new(events, self.settings)
    }

    /// Tears the plugin down, removing its sidebar entry.
    pub fn unload(self) {
        info!(
            "event=plugin_unload module=plugin status=ok plugin_id={}",
            self.manifest.id
        );
        self.sidebar.release();
    }
}
