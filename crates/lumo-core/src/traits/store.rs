//! Revisioned document store trait.
//!
//! This module defines the `DocumentStore` trait: a named key-value store
//! with optimistic concurrency control over the two launcher documents.

use crate::{DocKey, Result, Revision, StoredDocument};
use async_trait::async_trait;
use serde_json::Value;

/// Named key-value store with optimistic concurrency control.
///
/// Every write must present the revision token last observed for the same
/// document; a mismatch fails with [`Error::Conflict`](crate::Error::Conflict)
/// instead of merging. This prevents lost updates between concurrent writers
/// at the cost of surfacing, not recovering, conflicts.
///
/// # Type Safety
///
/// All implementations must be `Send + Sync` to work with Tokio's async
/// runtime.
///
/// # Examples
///
/// ```
/// use lumo_core::traits::DocumentStore;
/// use lumo_core::{DocKey, Error, Result, Revision, StoredDocument};
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use std::collections::HashMap;
/// use std::sync::Mutex;
///
/// struct CountingStore {
///     docs: Mutex<HashMap<DocKey, StoredDocument>>,
///     counter: Mutex<u64>,
/// }
///
/// #[async_trait]
/// impl DocumentStore for CountingStore {
///     async fn get(&self, key: &DocKey) -> Result<Option<StoredDocument>> {
///         let docs = self.docs.lock().map_err(|_| Error::Store {
///             message: "lock poisoned".to_string(),
///         })?;
///         Ok(docs.get(key).cloned())
///     }
///
///     async fn put(
///         &self,
///         key: &DocKey,
///         data: Value,
///         revision: Option<&Revision>,
///     ) -> Result<Revision> {
///         let mut docs = self.docs.lock().map_err(|_| Error::Store {
///             message: "lock poisoned".to_string(),
///         })?;
///         match (docs.get(key), revision) {
///             (None, None) => {}
///             (Some(current), Some(held)) if current.revision == *held => {}
///             _ => return Err(Error::Conflict { key: *key }),
///         }
///         let mut counter = self.counter.lock().map_err(|_| Error::Store {
///             message: "lock poisoned".to_string(),
///         })?;
///         *counter += 1;
///         let revision = Revision::new(counter.to_string());
///         docs.insert(*key, StoredDocument { data, revision: revision.clone() });
///         Ok(revision)
///     }
/// }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads the current value and revision for `key`.
    ///
    /// Returns `Ok(None)` if the document has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    async fn get(&self, key: &DocKey) -> Result<Option<StoredDocument>>;

    /// Writes `data` for `key` and returns the new revision.
    ///
    /// `revision` must be `None` when the document does not exist yet (the
    /// write is a create) and the token from the last observed revision
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`](crate::Error::Conflict) when `revision`
    /// does not match the store's current token for `key` — including a
    /// `Some` token offered for a missing document and a `None` offered for
    /// an existing one.
    async fn put(&self, key: &DocKey, data: Value, revision: Option<&Revision>)
    -> Result<Revision>;
}

// Stores are often shared between writers; delegate through Arc.
#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<T> {
    async fn get(&self, key: &DocKey) -> Result<Option<StoredDocument>> {
        (**self).get(key).await
    }

    async fn put(
        &self,
        key: &DocKey,
        data: Value,
        revision: Option<&Revision>,
    ) -> Result<Revision> {
        (**self).put(key, data, revision).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct TestStore {
        docs: Mutex<HashMap<DocKey, StoredDocument>>,
        counter: Mutex<u64>,
    }

    impl TestStore {
        fn new() -> Self {
            Self {
                docs: Mutex::new(HashMap::new()),
                counter: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentStore for TestStore {
        async fn get(&self, key: &DocKey) -> Result<Option<StoredDocument>> {
            let docs = self.docs.lock().map_err(|_| Error::Store {
                message: "lock poisoned".to_string(),
            })?;
            Ok(docs.get(key).cloned())
        }

        async fn put(
            &self,
            key: &DocKey,
            data: Value,
            revision: Option<&Revision>,
        ) -> Result<Revision> {
            let mut docs = self.docs.lock().map_err(|_| Error::Store {
                message: "lock poisoned".to_string(),
            })?;
            match (docs.get(key), revision) {
                (None, None) => {}
                (Some(current), Some(held)) if current.revision == *held => {}
                _ => return Err(Error::Conflict { key: *key }),
            }
            let mut counter = self.counter.lock().map_err(|_| Error::Store {
                message: "lock poisoned".to_string(),
            })?;
            *counter += 1;
            let revision = Revision::new(counter.to_string());
            docs.insert(
                *key,
                StoredDocument {
                    data,
                    revision: revision.clone(),
                },
            );
            Ok(revision)
        }
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = TestStore::new();
        let doc = store.get(&DocKey::TotalPlugins).await.unwrap();
        assert!(doc.is_none());
    }

    #[tokio::test]
    async fn create_then_update_with_fresh_revision() {
        let store = TestStore::new();
        let rev1 = store
            .put(&DocKey::TotalPlugins, json!([]), None)
            .await
            .unwrap();
        let rev2 = store
            .put(&DocKey::TotalPlugins, json!([1]), Some(&rev1))
            .await
            .unwrap();
        assert_ne!(rev1, rev2);
    }

    #[tokio::test]
    async fn stale_revision_conflicts() {
        let store = TestStore::new();
        let rev1 = store
            .put(&DocKey::TotalPlugins, json!([]), None)
            .await
            .unwrap();
        store
            .put(&DocKey::TotalPlugins, json!([1]), Some(&rev1))
            .await
            .unwrap();

        let err = store
            .put(&DocKey::TotalPlugins, json!([2]), Some(&rev1))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn create_over_existing_document_conflicts() {
        let store = TestStore::new();
        store
            .put(&DocKey::CachePlugins, json!([]), None)
            .await
            .unwrap();

        let err = store
            .put(&DocKey::CachePlugins, json!([]), None)
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn documents_are_independent() {
        let store = TestStore::new();
        let rev_total = store
            .put(&DocKey::TotalPlugins, json!(["t"]), None)
            .await
            .unwrap();
        store
            .put(&DocKey::CachePlugins, json!(["c"]), None)
            .await
            .unwrap();

        // the cache write must not disturb the total document's revision
        let doc = store.get(&DocKey::TotalPlugins).await.unwrap().unwrap();
        assert_eq!(doc.revision, rev_total);
        assert_eq!(doc.data, json!(["t"]));
    }
}
