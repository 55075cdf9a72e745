//! Default plugin-list merge policy.

use lumo_core::Plugin;
use lumo_core::traits::MergePlugins;
use std::collections::{HashMap, HashSet};

/// Name-keyed union merge.
///
/// Keeps the cached order, replaces a cached record with the incoming one of
/// the same name, and appends incoming records that were not cached yet in
/// their own order. Duplicate names inside either input collapse to a single
/// entry (last incoming occurrence wins).
#[derive(Debug, Default, Clone, Copy)]
pub struct NameMerge;

impl MergePlugins for NameMerge {
    fn merge(&self, cached: Vec<Plugin>, incoming: Vec<Plugin>) -> Vec<Plugin> {
        let mut fresh: HashMap<String, Plugin> = incoming
            .iter()
            .map(|plugin| (plugin.name.clone(), plugin.clone()))
            .collect();

        let mut merged = Vec::new();
        let mut seen = HashSet::new();
        for plugin in cached {
            if !seen.insert(plugin.name.clone()) {
                continue;
            }
            match fresh.remove(&plugin.name) {
                Some(updated) => merged.push(updated),
                None => merged.push(plugin),
            }
        }
        for plugin in incoming {
            if seen.contains(&plugin.name) {
                continue;
            }
            seen.insert(plugin.name.clone());
            if let Some(updated) = fresh.remove(&plugin.name) {
                merged.push(updated);
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_core::PluginKind;

    fn plugin(name: &str, desc: &str) -> Plugin {
        let mut plugin = Plugin::new(name, PluginKind::App);
        plugin.desc = desc.to_string();
        plugin
    }

    #[test]
    fn keeps_cached_order_and_appends_new() {
        let merge = NameMerge;
        let merged = merge.merge(
            vec![plugin("a", ""), plugin("b", "")],
            vec![plugin("c", ""), plugin("a", "")],
        );
        let names: Vec<_> = merged.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn incoming_record_wins_on_collision() {
        let merge = NameMerge;
        let merged = merge.merge(vec![plugin("a", "stale")], vec![plugin("a", "fresh")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].desc, "fresh");
    }

    #[test]
    fn duplicate_names_collapse() {
        let merge = NameMerge;
        let merged = merge.merge(
            vec![plugin("a", ""), plugin("a", "")],
            vec![plugin("b", "old"), plugin("b", "new")],
        );
        let names: Vec<_> = merged.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(merged[1].desc, "new");
    }

    #[test]
    fn empty_inputs() {
        let merge = NameMerge;
        assert!(merge.merge(vec![], vec![]).is_empty());
        assert_eq!(merge.merge(vec![plugin("a", "")], vec![]).len(), 1);
        assert_eq!(merge.merge(vec![], vec![plugin("a", "")]).len(), 1);
    }
}
