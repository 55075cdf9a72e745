//! Filesystem-backed plugin discovery.
//!
//! Plugins live one per subdirectory under a root, each described by a
//! `plugin.json` manifest. Directories without a manifest are skipped with a
//! warning; a root that cannot be read at all fails the enumeration.

use crate::manifest::assemble_plugin;
use async_trait::async_trait;
use lumo_core::traits::{DownloadRequest, PluginDiscovery, PluginSlot};
use lumo_core::{Error, Plugin, PluginKind, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Where [`FsDiscovery`] looks for plugins.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Root directory holding UI plugin subdirectories.
    pub ui_root: Option<PathBuf>,
    /// Root directory holding system plugin subdirectories.
    pub system_root: Option<PathBuf>,
    /// Launchable applications, configured directly.
    pub apps: Vec<Plugin>,
}

/// [`PluginDiscovery`] over manifest directories on disk.
#[derive(Debug)]
pub struct FsDiscovery {
    config: DiscoveryConfig,
}

impl FsDiscovery {
    /// Creates a discovery backend for the given roots.
    #[must_use]
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    fn scan_root(root: Option<&Path>, kind: PluginKind) -> Result<Vec<Plugin>> {
        let Some(root) = root else {
            return Ok(Vec::new());
        };
        let entries = fs::read_dir(root).map_err(|source| Error::Discovery {
            message: format!("cannot read plugin root {}", root.display()),
            source: Some(Box::new(source)),
        })?;

        let mut plugins = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Discovery {
                message: format!("cannot read entry under {}", root.display()),
                source: Some(Box::new(source)),
            })?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if !path.join("plugin.json").is_file() {
                tracing::warn!(path = %path.display(), "skipping directory without manifest");
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            match assemble_plugin(&path, kind, &name) {
                Ok(plugin) => plugins.push(plugin),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping unreadable manifest");
                }
            }
        }
        // read_dir order is platform-defined; keep the list stable
        plugins.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(plugins)
    }
}

#[async_trait]
impl PluginDiscovery for FsDiscovery {
    async fn init(&mut self) -> Result<()> {
        for root in [&self.config.ui_root, &self.config.system_root]
            .into_iter()
            .flatten()
        {
            fs::create_dir_all(root).map_err(|source| Error::Discovery {
                message: format!("cannot create plugin root {}", root.display()),
                source: Some(Box::new(source)),
            })?;
        }
        tracing::debug!("plugin roots ready");
        Ok(())
    }

    async fn ui_plugins(&self) -> Result<Vec<Plugin>> {
        Self::scan_root(self.config.ui_root.as_deref(), PluginKind::Ui)
    }

    async fn sys_plugins(&self) -> Result<Vec<Plugin>> {
        Self::scan_root(self.config.system_root.as_deref(), PluginKind::System)
    }

    async fn app_list(&self) -> Result<Vec<Plugin>> {
        Ok(self.config.apps.clone())
    }

    async fn download(&mut self, request: &DownloadRequest) -> Result<Vec<Plugin>> {
        // no remote registry here: a download is a re-scan of the slot
        match request.slot {
            PluginSlot::Ui => self.ui_plugins().await,
            PluginSlot::System => self.sys_plugins().await,
        }
    }
}
