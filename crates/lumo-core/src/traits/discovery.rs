//! Plugin discovery trait.
//!
//! The discovery subsystem produces plugin manifests; the launcher core only
//! consumes its lists. Enumeration failures surface as
//! [`Error::Discovery`](crate::Error::Discovery) — startup does not
//! partially degrade.

use crate::{Plugin, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which observable plugin slot a download refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginSlot {
    /// Installed UI extensions.
    Ui,
    /// System features.
    System,
}

/// Request to install or refresh plugins for one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Slot whose plugin list the download refreshes.
    pub slot: PluginSlot,
    /// Package or directory name to install, when the backend needs one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Enumerates installed plugins from their sources.
///
/// All implementations must be `Send + Sync` to work with Tokio's async
/// runtime.
#[async_trait]
pub trait PluginDiscovery: Send + Sync {
    /// Prepares the discovery backend (creates roots, opens handles).
    ///
    /// Must complete before any of the enumeration calls.
    async fn init(&mut self) -> Result<()>;

    /// Enumerates installed UI plugins.
    async fn ui_plugins(&self) -> Result<Vec<Plugin>>;

    /// Enumerates system plugins.
    async fn sys_plugins(&self) -> Result<Vec<Plugin>>;

    /// Enumerates launchable applications.
    async fn app_list(&self) -> Result<Vec<Plugin>>;

    /// Installs the requested plugin and returns the refreshed list for the
    /// slot.
    async fn download(&mut self, request: &DownloadRequest) -> Result<Vec<Plugin>>;
}
