//! In-memory revisioned document store.

use async_trait::async_trait;
use lumo_core::traits::DocumentStore;
use lumo_core::{DocKey, Error, Result, Revision, StoredDocument};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-process [`DocumentStore`] with optimistic concurrency control.
///
/// Revision tokens are freshly minted UUIDs; their only property is that a
/// successful write invalidates every previously issued token for the same
/// document. Creating a document requires offering no revision at all, so a
/// racing create surfaces as a conflict rather than a silent overwrite.
///
/// # Examples
///
/// ```
/// use lumo_core::DocKey;
/// use lumo_core::traits::DocumentStore;
/// use lumo_store::MemoryStore;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> lumo_core::Result<()> {
/// let store = MemoryStore::new();
/// let rev = store.put(&DocKey::TotalPlugins, json!([]), None).await?;
/// let doc = store.get(&DocKey::TotalPlugins).await?.unwrap();
/// assert_eq!(doc.revision, rev);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<DocKey, StoredDocument>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &DocKey) -> Result<Option<StoredDocument>> {
        let documents = self.documents.lock().await;
        Ok(documents.get(key).cloned())
    }

    async fn put(
        &self,
        key: &DocKey,
        data: Value,
        revision: Option<&Revision>,
    ) -> Result<Revision> {
        let mut documents = self.documents.lock().await;
        match (documents.get(key), revision) {
            // create of a missing document
            (None, None) => {}
            // update presenting the current token
            (Some(current), Some(held)) if current.revision == *held => {}
            _ => {
                tracing::debug!(key = %key, "rejecting write with mismatched revision");
                return Err(Error::Conflict { key: *key });
            }
        }

        let revision = Revision::new(Uuid::new_v4().to_string());
        documents.insert(
            *key,
            StoredDocument {
                data,
                revision: revision.clone(),
            },
        );
        Ok(revision)
    }
}
