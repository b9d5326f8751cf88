use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{DocumentId, RawDocument, StoreError, StoreHandle, StoreResult};

/// A record type persisted in its own collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Name of the collection holding records of this type.
    const COLLECTION: &'static str;

    fn id(&self) -> DocumentId;
}

/// Typed view over one collection of a [`DocumentStore`](crate::DocumentStore).
pub struct Collection<T> {
    store: StoreHandle,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Collection<T>
where
    T: Document,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &T::COLLECTION)
            .field("store", &self.store)
            .finish()
    }
}

fn to_raw<S: Serialize>(value: &S) -> StoreResult<RawDocument> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        Value::Null => Err(StoreError::NotAnObject("null")),
        Value::Bool(_) => Err(StoreError::NotAnObject("a boolean")),
        Value::Number(_) => Err(StoreError::NotAnObject("a number")),
        Value::String(_) => Err(StoreError::NotAnObject("a string")),
        Value::Array(_) => Err(StoreError::NotAnObject("an array")),
    }
}

fn from_raw<D: DeserializeOwned>(document: RawDocument) -> StoreResult<D> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

impl<T: Document> Collection<T> {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub async fn insert(&self, record: &T) -> StoreResult<()> {
        self.store
            .insert(T::COLLECTION, record.id(), to_raw(record)?)
            .await
    }

    pub async fn find_all(&self) -> StoreResult<Vec<T>> {
        self.find_all_projected().await
    }

    /// All records decoded as `P`, which typically names a subset of the
    /// record's fields.
    pub async fn find_all_projected<P: DeserializeOwned>(&self) -> StoreResult<Vec<P>> {
        self.store
            .find_all(T::COLLECTION)
            .await?
            .into_iter()
            .map(from_raw)
            .collect()
    }

    pub async fn find_by_id(&self, id: DocumentId) -> StoreResult<Option<T>> {
        self.store
            .find_by_id(T::COLLECTION, id)
            .await?
            .map(from_raw)
            .transpose()
    }

    /// Records matching `ids`, decoded as the projection `P`.
    pub async fn find_many_projected<P: DeserializeOwned>(
        &self,
        ids: &[DocumentId],
    ) -> StoreResult<Vec<P>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.store
            .find_many(T::COLLECTION, ids)
            .await?
            .into_iter()
            .map(from_raw)
            .collect()
    }

    /// Merge the serialized fields of `changes` into the record. Fields that
    /// `changes` skips while serializing are left untouched.
    pub async fn update_by_id<S: Serialize>(
        &self,
        id: DocumentId,
        changes: &S,
    ) -> StoreResult<Option<T>> {
        self.store
            .update_by_id(T::COLLECTION, id, to_raw(changes)?)
            .await?
            .map(from_raw)
            .transpose()
    }

    pub async fn delete_by_id(&self, id: DocumentId) -> StoreResult<bool> {
        self.store.delete_by_id(T::COLLECTION, id).await
    }
}
