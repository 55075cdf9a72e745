//! Startup orchestration and observable application state.

use crate::engine::QueryEngine;
use lumo_core::traits::{DocumentStore, DownloadRequest, MergePlugins, PluginDiscovery, PluginSlot};
use lumo_core::{DocKey, Plugin, Result, Revision, SearchResult};
use lumo_store::RevisionedCache;

/// Orchestrates startup and wires query results into observable state.
///
/// Startup order is fixed: discovery init → prime both documents → merge the
/// cached list with the authoritative one → persist → load the ui/system
/// plugin sets → merge the app list in → persist again → re-run the last
/// active query. A query issued while startup is still running observes
/// whatever state is committed at that instant; last write wins on the
/// result list.
///
/// All mutation funnels through `&mut self`, so there is a single writer at
/// a time by construction.
#[derive(Debug)]
pub struct StateController<S, D, M> {
    cache: RevisionedCache<S>,
    discovery: D,
    merge: M,
    engine: QueryEngine,
}

impl<S, D, M> StateController<S, D, M>
where
    S: DocumentStore,
    D: PluginDiscovery,
    M: MergePlugins,
{
    /// Creates a controller over the given collaborators.
    #[must_use]
    pub fn new(store: S, discovery: D, merge: M) -> Self {
        Self {
            cache: RevisionedCache::new(store),
            discovery,
            merge,
            engine: QueryEngine::new(),
        }
    }

    /// Runs the startup sequence.
    ///
    /// # Errors
    ///
    /// Any discovery or persistence failure aborts startup; there is no
    /// partial degradation.
    pub async fn init(&mut self) -> Result<()> {
        self.discovery.init().await?;

        let total = self.cache.get(DocKey::TotalPlugins).await?;
        let cached = self.cache.get(DocKey::CachePlugins).await?;
        let mut merged = self.merge.merge(cached, total);
        self.persist_both(&merged).await?;
        self.engine.set_total_plugins(merged.clone());
        tracing::info!(count = merged.len(), "restored plugin list");

        let ui_plugins = self.discovery.ui_plugins().await?;
        let sys_plugins = self.discovery.sys_plugins().await?;
        self.engine.set_ui_plugins(ui_plugins);
        self.engine.set_sys_plugins(sys_plugins);

        let apps = self.discovery.app_list().await?;
        merged = self.merge.merge(merged, apps);
        self.persist_both(&merged).await?;
        self.engine.set_total_plugins(merged);

        // the refreshed sets must be re-filtered against the last query
        let value = self.engine.state().search_value().to_string();
        self.on_search(&value).await?;
        tracing::info!("startup complete");
        Ok(())
    }

    /// Handles one query value and returns the produced result list.
    ///
    /// Non-empty queries persist the result snapshot under `cachePlugins`
    /// for session restoration; empty queries have no persistence side
    /// effect.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting the snapshot fails; the in-memory
    /// result list is updated regardless.
    pub async fn on_search(&mut self, value: &str) -> Result<&[SearchResult]> {
        self.engine.search(value);
        if !value.is_empty() {
            let snapshot: Vec<Plugin> = self
                .engine
                .state()
                .search_list()
                .iter()
                .map(|result| result.action.plugin().clone())
                .collect();
            self.cache.put(DocKey::CachePlugins, &snapshot).await?;
        }
        Ok(self.engine.state().search_list())
    }

    /// Installs plugins for a slot and refreshes the matching observable
    /// list.
    ///
    /// # Errors
    ///
    /// Propagates the discovery backend's failure.
    pub async fn download(&mut self, request: &DownloadRequest) -> Result<()> {
        let plugins = self.discovery.download(request).await?;
        tracing::info!(slot = ?request.slot, count = plugins.len(), "downloaded plugins");
        match request.slot {
            PluginSlot::Ui => self.engine.set_ui_plugins(plugins),
            PluginSlot::System => self.engine.set_sys_plugins(plugins),
        }
        Ok(())
    }

    async fn persist_both(&mut self, plugins: &[Plugin]) -> Result<()> {
        self.cache.put(DocKey::CachePlugins, plugins).await?;
        self.cache.put(DocKey::TotalPlugins, plugins).await?;
        Ok(())
    }

    /// The last produced result list.
    #[must_use]
    pub fn search_list(&self) -> &[SearchResult] {
        self.engine.state().search_list()
    }

    /// All known plugins.
    #[must_use]
    pub fn total_plugins(&self) -> &[Plugin] {
        self.engine.state().total_plugins()
    }

    /// Installed UI plugins.
    #[must_use]
    pub fn ui_plugins(&self) -> &[Plugin] {
        self.engine.state().ui_plugins()
    }

    /// System plugins.
    #[must_use]
    pub fn sys_plugins(&self) -> &[Plugin] {
        self.engine.state().sys_plugins()
    }

    /// The last non-empty query value.
    #[must_use]
    pub fn search_value(&self) -> &str {
        self.engine.state().search_value()
    }

    /// The revision currently held for `key`, for observability.
    #[must_use]
    pub fn revision(&self, key: DocKey) -> Option<&Revision> {
        self.cache.revision(key)
    }
}
