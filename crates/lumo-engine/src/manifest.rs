//! Plugin assembly from `plugin.json` manifests.

use lumo_core::{Error, Plugin, PluginKind, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

const MANIFEST_FILE: &str = "plugin.json";
const DEFAULT_MAIN: &str = "index.html";

/// Assembles a [`Plugin`] record from the manifest at `root`.
///
/// Synthesizes the record first — `source_file` points at the manifest's
/// `main` entry (default `index.html`) under `root`, `name` is the given
/// fallback, `desc`/`logo` come from the manifest's `description`/`logo` —
/// then overlays the raw manifest fields, so a manifest naming the same
/// field wins over the synthesized value.
///
/// # Errors
///
/// Returns [`Error::Manifest`] when the manifest cannot be read, is not a
/// JSON object, or the overlaid record does not form a valid plugin.
pub fn assemble_plugin(root: &Path, kind: PluginKind, name: &str) -> Result<Plugin> {
    let manifest_path = root.join(MANIFEST_FILE);
    let raw = fs::read_to_string(&manifest_path).map_err(|source| Error::Manifest {
        path: manifest_path.clone(),
        source: Box::new(source),
    })?;
    let manifest: Map<String, Value> =
        serde_json::from_str(&raw).map_err(|source| Error::Manifest {
            path: manifest_path.clone(),
            source: Box::new(source),
        })?;

    let main = manifest
        .get("main")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_MAIN);
    let mut plugin = Plugin::new(name, kind);
    plugin.source_file = Some(root.join(main));
    plugin.path = Some(root.to_path_buf());
    plugin.desc = manifest
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    plugin.logo = manifest
        .get("logo")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // manifest fields are applied last and may override the synthesized ones
    let mut record = serde_json::to_value(&plugin)?;
    if let Value::Object(fields) = &mut record {
        for (field, value) in manifest {
            fields.insert(field, value);
        }
    }
    let plugin = serde_json::from_value(record).map_err(|source| Error::Manifest {
        path: manifest_path,
        source: Box::new(source),
    })?;
    Ok(plugin)
}

/// Builds a dev plugin record for immediate dispatch.
///
/// `start_cmd` becomes the record's name, mirroring how the plugin was
/// invoked from search.
///
/// # Errors
///
/// Returns [`Error::Manifest`] when the manifest is missing or malformed;
/// there is no fallback manifest.
pub fn dev_plugin_detail(
    dev_plugin_path: &Path,
    kind: PluginKind,
    start_cmd: &str,
) -> Result<Plugin> {
    let plugin = assemble_plugin(dev_plugin_path, kind, start_cmd)?;
    tracing::debug!(
        plugin = %plugin.name,
        path = %dev_plugin_path.display(),
        "assembled dev plugin"
    );
    Ok(plugin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, contents: &str) {
        fs::write(dir.path().join(MANIFEST_FILE), contents).unwrap();
    }

    #[test]
    fn synthesizes_record_from_sparse_manifest() {
        let dir = TempDir::new().unwrap();
        write_manifest(&dir, r#"{"description": "translate words"}"#);

        let plugin = dev_plugin_detail(dir.path(), PluginKind::Dev, "translate").unwrap();
        assert_eq!(plugin.name, "translate");
        assert_eq!(plugin.kind, PluginKind::Dev);
        assert_eq!(plugin.desc, "translate words");
        assert_eq!(
            plugin.source_file,
            Some(dir.path().join("index.html")),
            "missing main falls back to index.html"
        );
        assert_eq!(plugin.path, Some(dir.path().to_path_buf()));
    }

    #[test]
    fn manifest_main_overrides_default_entry() {
        let dir = TempDir::new().unwrap();
        write_manifest(&dir, r#"{"main": "dist/app.html"}"#);

        let plugin = dev_plugin_detail(dir.path(), PluginKind::Dev, "app").unwrap();
        assert_eq!(plugin.source_file, Some(dir.path().join("dist/app.html")));
    }

    #[test]
    fn manifest_fields_win_over_synthesized_ones() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            &dir,
            r#"{"name": "Official Name", "desc": "manifest desc", "keyWords": ["kw"]}"#,
        );

        let plugin = dev_plugin_detail(dir.path(), PluginKind::Dev, "start").unwrap();
        assert_eq!(plugin.name, "Official Name");
        assert_eq!(plugin.desc, "manifest desc");
        assert_eq!(plugin.key_words, Some(vec!["kw".to_string()]));
    }

    #[test]
    fn manifest_features_pass_through() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            &dir,
            r#"{"features": [{"explain": "img tool", "cmds": ["convert", {"type": "resize"}]}]}"#,
        );

        let plugin = dev_plugin_detail(dir.path(), PluginKind::Dev, "img").unwrap();
        assert_eq!(plugin.features.len(), 1);
        assert_eq!(plugin.features[0].cmds.len(), 2);
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = dev_plugin_detail(dir.path(), PluginKind::Dev, "ghost").unwrap_err();
        assert!(err.is_manifest());
    }

    #[test]
    fn malformed_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_manifest(&dir, "{not json");
        let err = dev_plugin_detail(dir.path(), PluginKind::Dev, "broken").unwrap_err();
        assert!(err.is_manifest());
    }
}
