//! The plugin domain model.
//!
//! A [`Plugin`] is a unit of launchable functionality: an installed
//! application, a UI extension, a developer-mode extension loaded from a
//! local path, or a system feature. Field names on the wire follow the
//! manifest format (`keyWords`, `sourceFile`, `type`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Plugin category, driving both matching and dispatch.
///
/// # Examples
///
/// ```
/// use lumo_core::PluginKind;
///
/// let kind: PluginKind = serde_json::from_str("\"ui\"").unwrap();
/// assert_eq!(kind, PluginKind::Ui);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    /// Installed application launched by an external command.
    App,
    /// UI extension opened in a hosted window.
    Ui,
    /// Developer-mode extension loaded from a local path.
    Dev,
    /// Built-in system feature.
    System,
}

impl PluginKind {
    /// Returns the wire name of the kind.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Ui => "ui",
            Self::Dev => "dev",
            Self::System => "system",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invocation command of a [`Feature`].
///
/// Manifests write commands either as a bare string or as an object carrying
/// at least a `type` discriminator. Both forms expose one matchable text via
/// [`Cmd::matchable_text`].
///
/// # Examples
///
/// ```
/// use lumo_core::Cmd;
///
/// let plain: Cmd = serde_json::from_str("\"convert\"").unwrap();
/// assert_eq!(plain.matchable_text(), "convert");
///
/// let typed: Cmd = serde_json::from_str(r#"{"type": "resize"}"#).unwrap();
/// assert_eq!(typed.matchable_text(), "resize");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cmd {
    /// Bare command text.
    Text(String),
    /// Object form; only the `type` field participates in matching.
    Typed {
        /// Discriminator used as the matchable text.
        #[serde(rename = "type")]
        kind: String,
    },
}

impl Cmd {
    /// Returns the text a query is matched against.
    #[must_use]
    pub fn matchable_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Typed { kind } => kind,
        }
    }
}

impl From<&str> for Cmd {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A named capability of a plugin exposing one or more invocation commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Stable feature code, when the manifest assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Description shown next to a command match.
    #[serde(default)]
    pub explain: String,
    /// Invocation commands, in manifest order.
    #[serde(default)]
    pub cmds: Vec<Cmd>,
}

/// A discovered unit of launchable functionality.
///
/// Plugin records are shared by reference between the authoritative total
/// list and any search views; persistence serializes a snapshot, so callers
/// may keep mutating the in-memory record afterwards.
///
/// # Examples
///
/// ```
/// use lumo_core::{Plugin, PluginKind};
///
/// let mut plugin = Plugin::new("Calc", PluginKind::App);
/// plugin.action = Some("gnome-calculator".to_string());
/// assert!(plugin.is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    /// Display name; stable identifier within a session.
    pub name: String,
    /// Plugin category.
    #[serde(rename = "type")]
    pub kind: PluginKind,
    /// Capabilities exposed for feature-command matching.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Name-level match keywords; only used outside feature matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_words: Option<Vec<String>>,
    /// Entry file on disk; present for `ui`/`dev` plugins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<PathBuf>,
    /// Display logo, relative to the plugin root.
    #[serde(default)]
    pub logo: String,
    /// Display description.
    #[serde(default)]
    pub desc: String,
    /// External command to execute; only meaningful for `app` plugins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Enabled flag; only meaningful for `dev` plugins.
    #[serde(default)]
    pub status: bool,
    /// Root directory the plugin was loaded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Plugin {
    /// Creates a plugin with the given name and kind, all other fields empty.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PluginKind) -> Self {
        Self {
            name: name.into(),
            kind,
            features: Vec::new(),
            key_words: None,
            source_file: None,
            logo: String::new(),
            desc: String::new(),
            action: None,
            status: false,
            path: None,
        }
    }

    /// Returns `false` only for dev plugins whose `status` flag is off.
    ///
    /// Disabled dev plugins are excluded from feature-command matching.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.kind != PluginKind::Dev || self.status
    }
}
