//! The incremental query engine.
//!
//! Matching is exact case-insensitive substring containment, in two passes:
//! a feature-command pass over the UI plugins and a keyword pass over the
//! full plugin set. There is no ranking or scoring; results keep the stable
//! order of their sources.

use lumo_core::{LaunchAction, Plugin, RESULT_VALUE, SearchResult};
use std::collections::HashSet;
use std::path::Path;

/// Process-wide engine state, owned by the [`QueryEngine`].
///
/// Single writer at a time: every mutation goes through the engine's
/// `&mut self` operations.
#[derive(Debug, Default, Clone)]
pub struct EngineState {
    total_plugins: Vec<Plugin>,
    ui_plugins: Vec<Plugin>,
    sys_plugins: Vec<Plugin>,
    search_value: String,
    search_list: Vec<SearchResult>,
}

impl EngineState {
    /// All known plugins.
    #[must_use]
    pub fn total_plugins(&self) -> &[Plugin] {
        &self.total_plugins
    }

    /// The UI-plugin subset; feature-command matching only applies here.
    #[must_use]
    pub fn ui_plugins(&self) -> &[Plugin] {
        &self.ui_plugins
    }

    /// System plugins, exposed for the presentation layer.
    #[must_use]
    pub fn sys_plugins(&self) -> &[Plugin] {
        &self.sys_plugins
    }

    /// The last non-empty query value.
    #[must_use]
    pub fn search_value(&self) -> &str {
        &self.search_value
    }

    /// The last produced result set.
    #[must_use]
    pub fn search_list(&self) -> &[SearchResult] {
        &self.search_list
    }
}

/// Turns free-text query values into actionable search results.
///
/// # Examples
///
/// ```
/// use lumo_core::{Cmd, Feature, Plugin, PluginKind};
/// use lumo_engine::QueryEngine;
///
/// let mut image_tool = Plugin::new("img", PluginKind::Ui);
/// image_tool.features.push(Feature {
///     code: None,
///     explain: "img tool".to_string(),
///     cmds: vec![Cmd::from("convert")],
/// });
///
/// let mut engine = QueryEngine::new();
/// engine.set_ui_plugins(vec![image_tool]);
///
/// let results = engine.search("conv");
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].name, "convert");
/// ```
#[derive(Debug, Default)]
pub struct QueryEngine {
    state: EngineState,
}

impl QueryEngine {
    /// Creates an engine with empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the engine state.
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Replaces the full plugin set.
    pub fn set_total_plugins(&mut self, plugins: Vec<Plugin>) {
        self.state.total_plugins = plugins;
    }

    /// Replaces the UI-plugin subset.
    pub fn set_ui_plugins(&mut self, plugins: Vec<Plugin>) {
        self.state.ui_plugins = plugins;
    }

    /// Replaces the system-plugin list.
    pub fn set_sys_plugins(&mut self, plugins: Vec<Plugin>) {
        self.state.sys_plugins = plugins;
    }

    /// Runs a query and replaces the result list.
    ///
    /// An empty `value` yields the full plugin set unchanged — no filtering,
    /// no renaming — and leaves the remembered `search_value` untouched.
    /// A non-empty `value` becomes the new `search_value` and produces the
    /// feature-command matches followed by the keyword matches.
    pub fn search(&mut self, value: &str) -> &[SearchResult] {
        if value.is_empty() {
            self.state.search_list = self
                .state
                .total_plugins
                .iter()
                .cloned()
                .map(SearchResult::from_plugin)
                .collect();
            return &self.state.search_list;
        }

        self.state.search_value = value.to_string();
        let needle = value.to_lowercase();

        let mut results = self.feature_command_pass(&needle);
        results.extend(self.keyword_pass(&needle));
        tracing::debug!(value, count = results.len(), "query produced results");

        self.state.search_list = results;
        &self.state.search_list
    }

    /// Feature-command pass: every cmd of every feature of every enabled UI
    /// plugin whose matchable text contains the query.
    fn feature_command_pass(&self, needle: &str) -> Vec<SearchResult> {
        let mut results = Vec::new();
        // snapshots keep downstream activation handlers away from live records
        for plugin in self.state.ui_plugins.clone() {
            if !plugin.is_enabled() {
                continue;
            }
            for feature in &plugin.features {
                for cmd in &feature.cmds {
                    let text = cmd.matchable_text();
                    if !text.to_lowercase().contains(needle) {
                        continue;
                    }
                    results.push(SearchResult {
                        name: text.to_string(),
                        value: RESULT_VALUE.to_string(),
                        icon: icon_uri(&plugin),
                        desc: feature.explain.clone(),
                        kind: plugin.kind,
                        action: LaunchAction::OpenPlugin {
                            plugin: plugin.clone(),
                            cmd: Some(text.to_string()),
                            feature: Some(feature.clone()),
                        },
                    });
                }
            }
        }
        results
    }

    /// Keyword pass: first matching keyword wins and renames the plugin's
    /// display name; at most one result per plugin identity.
    fn keyword_pass(&self, needle: &str) -> Vec<SearchResult> {
        let mut results = Vec::new();
        let mut visited = HashSet::new();
        for mut plugin in self.state.total_plugins.clone() {
            if !visited.insert(plugin.name.clone()) {
                continue;
            }
            let Some(key_words) = &plugin.key_words else {
                continue;
            };
            let matched = key_words
                .iter()
                .find(|keyword| keyword.to_lowercase().contains(needle))
                .cloned();
            if let Some(keyword) = matched {
                // visible rename: the result shows why the plugin matched
                plugin.name = keyword;
                results.push(SearchResult::from_plugin(plugin));
            }
        }
        results
    }
}

/// Display icon for a plugin: the logo resolved next to its source file as
/// an `image://` URI, or the bare logo when there is no source file.
fn icon_uri(plugin: &Plugin) -> String {
    match &plugin.source_file {
        Some(source_file) => {
            let dir = source_file.parent().unwrap_or_else(|| Path::new(""));
            format!("image://{}", dir.join(&plugin.logo).display())
        }
        None => plugin.logo.clone(),
    }
}
