//! CLI configuration file handling.
//!
//! The config is TOML, looked up at `<config dir>/lumo/config.toml` unless a
//! path is passed explicitly. A missing file is not an error; everything has
//! a default.

use anyhow::Context;
use lumo_core::{Plugin, PluginKind};
use lumo_engine::DiscoveryConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One launchable application entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AppEntry {
    /// Display name.
    pub name: String,
    /// External command executed on launch.
    pub action: String,
    /// Display description.
    #[serde(default)]
    pub desc: String,
    /// Display logo.
    #[serde(default)]
    pub logo: String,
    /// Name-level match keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl AppEntry {
    fn into_plugin(self) -> Plugin {
        let mut plugin = Plugin::new(self.name, PluginKind::App);
        plugin.action = Some(self.action);
        plugin.desc = self.desc;
        plugin.logo = self.logo;
        if !self.keywords.is_empty() {
            plugin.key_words = Some(self.keywords);
        }
        plugin
    }
}

/// Parsed CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Root directory holding UI plugin subdirectories.
    pub ui_dir: Option<PathBuf>,
    /// Root directory holding system plugin subdirectories.
    pub system_dir: Option<PathBuf>,
    /// Launchable applications.
    pub apps: Vec<AppEntry>,
}

impl CliConfig {
    /// Loads the config from `path`, or from the default location when no
    /// path is given. A missing file yields the default config.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("cannot parse config {}", path.display()))?;
        Ok(config)
    }

    /// Converts the config into discovery roots and app entries.
    pub fn into_discovery(self) -> DiscoveryConfig {
        DiscoveryConfig {
            ui_root: self.ui_dir,
            system_root: self.system_dir,
            apps: self.apps.into_iter().map(AppEntry::into_plugin).collect(),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lumo").join("config.toml"))
}
