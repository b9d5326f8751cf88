use std::path::Path;

use async_trait::async_trait;
use sled::{Db, Tree};

use crate::store::merge_fields;
use crate::{DocumentId, DocumentStore, RawDocument, StoreError, StoreResult};

/// Sled-backed document store.
///
/// Each collection is a sled tree; values are JSON-encoded documents keyed by
/// the raw 16 bytes of their [`DocumentId`].
#[derive(Debug, Clone)]
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Open (or create) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let db = sled::open(path.as_ref())?;

        tracing::info!(
            target: "bookshelf-db",
            backend = "sled",
            path = %path.as_ref().display(),
            recovered = db.was_recovered(),
            "document store opened"
        );

        Ok(Self { db })
    }

    fn tree(&self, collection: &str) -> StoreResult<Tree> {
        Ok(self.db.open_tree(collection)?)
    }
}

fn decode(bytes: &[u8]) -> StoreResult<RawDocument> {
    Ok(serde_json::from_slice(bytes)?)
}

fn encode(document: &RawDocument) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(document)?)
}

#[async_trait]
impl DocumentStore for SledStore {
    async fn insert(
        &self,
        collection: &str,
        id: DocumentId,
        document: RawDocument,
    ) -> StoreResult<()> {
        let tree = self.tree(collection)?;
        let swapped = tree.compare_and_swap(
            id.storage_key(),
            None as Option<&[u8]>,
            Some(encode(&document)?),
        )?;
        if swapped.is_err() {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id,
            });
        }
        Ok(())
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<RawDocument>> {
        let tree = self.tree(collection)?;
        let mut documents = Vec::with_capacity(tree.len());
        for item in tree.iter() {
            let (_, value) = item?;
            documents.push(decode(&value)?);
        }
        Ok(documents)
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> StoreResult<Option<RawDocument>> {
        let tree = self.tree(collection)?;
        tree.get(id.storage_key())?
            .map(|value| decode(&value))
            .transpose()
    }

    async fn find_many(
        &self,
        collection: &str,
        ids: &[DocumentId],
    ) -> StoreResult<Vec<RawDocument>> {
        let mut sorted = ids.to_vec();
        sorted.sort();
        sorted.dedup();

        let tree = self.tree(collection)?;
        let mut documents = Vec::with_capacity(sorted.len());
        for id in sorted {
            if let Some(value) = tree.get(id.storage_key())? {
                documents.push(decode(&value)?);
            }
        }
        Ok(documents)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: DocumentId,
        fields: RawDocument,
    ) -> StoreResult<Option<RawDocument>> {
        let tree = self.tree(collection)?;

        // sled may run the closure more than once under contention, and it
        // cannot return errors, so failures are parked and checked afterwards.
        let mut failure = None;
        let updated = tree.update_and_fetch(id.storage_key(), |current| {
            let current = current?;
            let merged = decode(current).and_then(|mut document| {
                merge_fields(&mut document, fields.clone());
                encode(&document)
            });
            match merged {
                Ok(bytes) => {
                    failure = None;
                    Some(bytes)
                }
                Err(err) => {
                    failure = Some(err);
                    Some(current.to_vec())
                }
            }
        })?;

        if let Some(err) = failure {
            return Err(err);
        }
        updated.map(|value| decode(&value)).transpose()
    }

    async fn delete_by_id(&self, collection: &str, id: DocumentId) -> StoreResult<bool> {
        let tree = self.tree(collection)?;
        Ok(tree.remove(id.storage_key())?.is_some())
    }

    async fn flush(&self) -> StoreResult<()> {
        let flushed = self.db.flush_async().await?;
        tracing::debug!(target: "bookshelf-db", bytes = flushed, "document store flushed");
        Ok(())
    }
}
