//! Owned sidebar entry registration.
//!
//! The entry exists exactly as long as its `SidebarRegistration` value:
//! dropping or releasing the handle removes it from the host once.

use crate::plugin::manifest::SidebarEntrySpec;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Host-assigned identifier of one sidebar entry.
pub type SidebarEntryId = u64;

/// Host surface able to show plugin entry points.
pub trait SidebarHost {
    fn add_entry(&self, spec: &SidebarEntrySpec) -> Result<SidebarEntryId, SidebarError>;
    fn remove_entry(&self, entry_id: SidebarEntryId);
}

/// Sidebar registration errors reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarError {
    /// Host has no sidebar surface (e.g. headless mode).
    Unsupported,
    Rejected(String),
}

impl Display for SidebarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "host does not provide a sidebar"),
            Self::Rejected(message) => write!(f, "sidebar entry rejected: {message}"),
        }
    }
}

impl Error for SidebarError {}

/// Live sidebar entry owned by the plugin.
pub struct SidebarRegistration<'h, H: SidebarHost + ?Sized> {
    host: &'h H,
    entry_id: Option<SidebarEntryId>,
}

impl<'h, H: SidebarHost + ?Sized> SidebarRegistration<'h, H> {
    /// Adds the entry to the host sidebar.
    pub fn register(host: &'h H, spec: &SidebarEntrySpec) -> Result<Self, SidebarError> {
        let entry_id = host.add_entry(spec).map_err(|err| {
            warn!("event=sidebar_register module=plugin status=error error={err}");
            err
        })?;
        info!("event=sidebar_register module=plugin status=ok entry_id={entry_id}");
        Ok(Self {
            host,
            entry_id: Some(entry_id),
        })
    }

    pub fn entry_id(&self) -> Option<SidebarEntryId> {
        self.entry_id
    }

    /// Removes the entry now instead of at drop time.
    pub fn release(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if let Some(entry_id) = self.entry_id.take() {
            self.host.remove_entry(entry_id);
            info!("event=sidebar_release module=plugin status=ok entry_id={entry_id}");
        }
    }
}

impl<H: SidebarHost + ?Sized> Drop for SidebarRegistration<'_, H> {
    fn drop(&mut self) {
        self.remove();
    }
}
