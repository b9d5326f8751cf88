use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::merge_fields;
use crate::{DocumentId, DocumentStore, RawDocument, StoreError, StoreResult};

type CollectionMap = BTreeMap<DocumentId, RawDocument>;

/// In-memory implementation of the document store.
///
/// Contents are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, CollectionMap>>>,
}

impl MemoryStore {
    /// Creates a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: &str,
        id: DocumentId,
        document: RawDocument,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        if documents.contains_key(&id) {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id,
            });
        }
        documents.insert(id, document);
        Ok(())
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<RawDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> StoreResult<Option<RawDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(&id))
            .cloned())
    }

    async fn find_many(
        &self,
        collection: &str,
        ids: &[DocumentId],
    ) -> StoreResult<Vec<RawDocument>> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(documents
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(_, document)| document.clone())
            .collect())
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: DocumentId,
        fields: RawDocument,
    ) -> StoreResult<Option<RawDocument>> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|documents| documents.get_mut(&id))
        else {
            return Ok(None);
        };
        merge_fields(document, fields);
        Ok(Some(document.clone()))
    }

    async fn delete_by_id(&self, collection: &str, id: DocumentId) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|documents| documents.remove(&id))
            .is_some())
    }
}
