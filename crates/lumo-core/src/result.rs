//! Search results and the dispatchable action descriptor.
//!
//! A [`SearchResult`] lives for exactly one query cycle; the engine rebuilds
//! the whole list on every search. Instead of binding executable closures
//! into results, each result carries a [`LaunchAction`] descriptor that the
//! dispatcher interprets when the user activates it.

use crate::{Feature, Plugin, PluginKind};
use serde::{Deserialize, Serialize};

/// Fixed `value` tag carried by every search result.
pub const RESULT_VALUE: &str = "plugin";

/// Discriminated action descriptor interpreted by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LaunchAction {
    /// Open the referenced plugin, optionally with the matched command and
    /// the feature it belongs to.
    OpenPlugin {
        /// Snapshot of the plugin to open.
        plugin: Plugin,
        /// Matched command text, for feature-command results.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cmd: Option<String>,
        /// Feature the command belongs to, for feature-command results.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature: Option<Feature>,
    },
}

impl LaunchAction {
    /// Returns the plugin this action refers to.
    #[must_use]
    pub fn plugin(&self) -> &Plugin {
        match self {
            Self::OpenPlugin { plugin, .. } => plugin,
        }
    }
}

/// One actionable entry of a search-result list.
///
/// Ephemeral: produced per query, never persisted as-is (the cache document
/// stores the underlying plugin snapshots).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Display name: the matched command text or the plugin name.
    pub name: String,
    /// Fixed tag, always [`RESULT_VALUE`].
    pub value: String,
    /// Display icon, either a plain logo or an `image://` URI.
    pub icon: String,
    /// Display description.
    pub desc: String,
    /// Kind of the plugin behind this result.
    #[serde(rename = "type")]
    pub kind: PluginKind,
    /// What activating this result does.
    pub action: LaunchAction,
}

impl SearchResult {
    /// Builds a result that represents the plugin itself, as emitted by the
    /// keyword pass and by empty-value queries.
    #[must_use]
    pub fn from_plugin(plugin: Plugin) -> Self {
        Self {
            name: plugin.name.clone(),
            value: RESULT_VALUE.to_string(),
            icon: plugin.logo.clone(),
            desc: plugin.desc.clone(),
            kind: plugin.kind,
            action: LaunchAction::OpenPlugin {
                plugin,
                cmd: None,
                feature: None,
            },
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_plugin_copies_display_fields() {
        let mut plugin = Plugin::new("Calc", PluginKind::App);
        plugin.logo = "calc.png".to_string();
        plugin.desc = "calculator".to_string();

        let result = SearchResult::from_plugin(plugin.clone());
        assert_eq!(result.name, "Calc");
        assert_eq!(result.value, RESULT_VALUE);
        assert_eq!(result.icon, "calc.png");
        assert_eq!(result.desc, "calculator");
        assert_eq!(result.kind, PluginKind::App);
        assert_eq!(result.action.plugin(), &plugin);
    }

    #[test]
    fn action_serializes_with_kind_tag() {
        let action = LaunchAction::OpenPlugin {
            plugin: Plugin::new("img", PluginKind::Ui),
            cmd: Some("convert".to_string()),
            feature: None,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"kind\":\"openPlugin\""));
        assert!(json.contains("\"cmd\":\"convert\""));
    }
}
