//! Plugin-list merge policy trait.

use crate::Plugin;

/// Dedup/union policy for combining a cached plugin list with fresh input.
///
/// The policy is opaque to the launcher core: startup hands it the
/// previously cached list and a freshly discovered one and persists whatever
/// comes back.
pub trait MergePlugins: Send + Sync {
    /// Merges `cached` with `incoming` into one list.
    fn merge(&self, cached: Vec<Plugin>, incoming: Vec<Plugin>) -> Vec<Plugin>;
}
