//! Revision-tracking cache for the two launcher documents.

use lumo_core::traits::DocumentStore;
use lumo_core::{DocKey, Plugin, Result, Revision};

/// Wraps a [`DocumentStore`] for the `cachePlugins` and `totalPlugins`
/// documents, holding the current revision token for each.
///
/// The cache exclusively owns the two tokens: a successful `put` stores the
/// returned token for the next write, and a failed one leaves the held token
/// stale on purpose — the next write to the same document will also conflict
/// until [`get`](Self::get) re-primes it. Conflicts are surfaced to the
/// caller, never retried here.
///
/// Both operations take `&mut self`, so interleaving two writes to the same
/// document without awaiting completion is not expressible against a single
/// cache value.
///
/// # Examples
///
/// ```
/// use lumo_core::{DocKey, Plugin, PluginKind};
/// use lumo_store::{MemoryStore, RevisionedCache};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> lumo_core::Result<()> {
/// let mut cache = RevisionedCache::new(MemoryStore::new());
///
/// // a missing document reads as an empty list; the first put creates it
/// assert!(cache.get(DocKey::TotalPlugins).await?.is_empty());
/// cache
///     .put(DocKey::TotalPlugins, &[Plugin::new("Calc", PluginKind::App)])
///     .await?;
///
/// assert_eq!(cache.get(DocKey::TotalPlugins).await?.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RevisionedCache<S> {
    store: S,
    total_revision: Option<Revision>,
    cache_revision: Option<Revision>,
}

impl<S: DocumentStore> RevisionedCache<S> {
    /// Creates a cache over `store` with no revisions primed yet.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            total_revision: None,
            cache_revision: None,
        }
    }

    /// Returns the revision currently held for `key`, if any.
    #[must_use]
    pub fn revision(&self, key: DocKey) -> Option<&Revision> {
        self.held(key).as_ref()
    }

    /// Returns a reference to the backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the current plugin list for `key` and primes the held revision.
    ///
    /// A document that does not exist yet reads as an empty list with no
    /// revision, so the subsequent first `put` is treated as a create.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails or the stored snapshot does
    /// not decode as a plugin list.
    pub async fn get(&mut self, key: DocKey) -> Result<Vec<Plugin>> {
        match self.store.get(&key).await? {
            Some(document) => {
                let plugins = serde_json::from_value(document.data)?;
                *self.held_mut(key) = Some(document.revision);
                Ok(plugins)
            }
            None => {
                *self.held_mut(key) = None;
                Ok(Vec::new())
            }
        }
    }

    /// Writes a snapshot of `plugins` for `key` using the held revision.
    ///
    /// The snapshot is serialized before the write, so later mutations of
    /// the in-memory records do not leak into the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`](lumo_core::Error::Conflict) when the held
    /// revision no longer matches the store — the in-memory state stays
    /// updated, the held token stays stale, and the caller decides how to
    /// re-read.
    pub async fn put(&mut self, key: DocKey, plugins: &[Plugin]) -> Result<Revision> {
        let snapshot = serde_json::to_value(plugins)?;
        let revision = self.store.put(&key, snapshot, self.held(key).as_ref()).await?;
        tracing::debug!(key = %key, revision = %revision, count = plugins.len(), "persisted document");
        *self.held_mut(key) = Some(revision.clone());
        Ok(revision)
    }

    fn held(&self, key: DocKey) -> &Option<Revision> {
        match key {
            DocKey::CachePlugins => &self.cache_revision,
            DocKey::TotalPlugins => &self.total_revision,
        }
    }

    fn held_mut(&mut self, key: DocKey) -> &mut Option<Revision> {
        match key {
            DocKey::CachePlugins => &mut self.cache_revision,
            DocKey::TotalPlugins => &mut self.total_revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use lumo_core::PluginKind;

    fn plugins(names: &[&str]) -> Vec<Plugin> {
        names
            .iter()
            .map(|name| Plugin::new(*name, PluginKind::App))
            .collect()
    }

    #[tokio::test]
    async fn missing_document_reads_empty() {
        let mut cache = RevisionedCache::new(MemoryStore::new());
        assert!(cache.get(DocKey::CachePlugins).await.unwrap().is_empty());
        assert!(cache.revision(DocKey::CachePlugins).is_none());
    }

    #[tokio::test]
    async fn sequential_puts_always_succeed() {
        let mut cache = RevisionedCache::new(MemoryStore::new());
        cache
            .put(DocKey::TotalPlugins, &plugins(&["a"]))
            .await
            .unwrap();
        cache
            .put(DocKey::TotalPlugins, &plugins(&["a", "b"]))
            .await
            .unwrap();

        let stored = cache.get(DocKey::TotalPlugins).await.unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn keys_hold_independent_revisions() {
        let mut cache = RevisionedCache::new(MemoryStore::new());
        let total = cache
            .put(DocKey::TotalPlugins, &plugins(&["a"]))
            .await
            .unwrap();
        let cached = cache
            .put(DocKey::CachePlugins, &plugins(&["b"]))
            .await
            .unwrap();
        assert_ne!(total, cached);
        assert_eq!(cache.revision(DocKey::TotalPlugins), Some(&total));
        assert_eq!(cache.revision(DocKey::CachePlugins), Some(&cached));
    }

    #[tokio::test]
    async fn stale_writer_conflicts_until_reread() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut writer_a = RevisionedCache::new(std::sync::Arc::clone(&store));
        let mut writer_b = RevisionedCache::new(store);

        writer_a
            .put(DocKey::TotalPlugins, &plugins(&["a"]))
            .await
            .unwrap();
        writer_b.get(DocKey::TotalPlugins).await.unwrap();

        // a advances the document, so b's held token goes stale
        writer_a
            .put(DocKey::TotalPlugins, &plugins(&["a2"]))
            .await
            .unwrap();
        let err = writer_b
            .put(DocKey::TotalPlugins, &plugins(&["b"]))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // still stale: the failed write must not refresh the token
        let err = writer_b
            .put(DocKey::TotalPlugins, &plugins(&["b"]))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // re-reading primes a fresh token and the write goes through
        writer_b.get(DocKey::TotalPlugins).await.unwrap();
        writer_b
            .put(DocKey::TotalPlugins, &plugins(&["b"]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn put_serializes_a_snapshot() {
        let mut cache = RevisionedCache::new(MemoryStore::new());
        let mut live = plugins(&["mutable"]);
        cache.put(DocKey::CachePlugins, &live).await.unwrap();

        // mutating the live record afterwards must not affect the stored copy
        live[0].name = "changed".to_string();
        let stored = cache.get(DocKey::CachePlugins).await.unwrap();
        assert_eq!(stored[0].name, "mutable");
    }
}
