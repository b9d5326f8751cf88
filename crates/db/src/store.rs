use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{DocumentId, StoreResult};

/// A stored document: a JSON object.
pub type RawDocument = Map<String, Value>;

/// Field carrying the document identity inside every stored document.
pub const ID_FIELD: &str = "_id";

/// Collection-oriented document persistence.
///
/// Every operation touches a single document (or reads a collection) and is
/// atomic per document. There are no multi-document transactions.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Store a new document under `id`.
    async fn insert(&self, collection: &str, id: DocumentId, document: RawDocument)
        -> StoreResult<()>;

    /// All documents of a collection, oldest first.
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<RawDocument>>;

    async fn find_by_id(&self, collection: &str, id: DocumentId)
        -> StoreResult<Option<RawDocument>>;

    /// Documents matching any of `ids`; missing ids are skipped.
    async fn find_many(&self, collection: &str, ids: &[DocumentId])
        -> StoreResult<Vec<RawDocument>>;

    /// Overwrite the top-level `fields` of an existing document and return
    /// the result, or `None` when no document has that id. The identity field
    /// is never overwritten.
    async fn update_by_id(
        &self,
        collection: &str,
        id: DocumentId,
        fields: RawDocument,
    ) -> StoreResult<Option<RawDocument>>;

    /// Remove a document; returns whether it existed.
    async fn delete_by_id(&self, collection: &str, id: DocumentId) -> StoreResult<bool>;

    /// Persist buffered writes, if the backend buffers any.
    async fn flush(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Apply a `$set`-style merge of `fields` onto `document`.
pub(crate) fn merge_fields(document: &mut RawDocument, fields: RawDocument) {
    for (key, value) in fields {
        if key != ID_FIELD {
            document.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overwrites_supplied_fields_only() {
        let mut document = json!({"_id": "a", "title": "old", "price": 3})
            .as_object()
            .cloned()
            .unwrap();
        let fields = json!({"_id": "b", "title": "new"}).as_object().cloned().unwrap();

        merge_fields(&mut document, fields);

        assert_eq!(
            Value::Object(document),
            json!({"_id": "a", "title": "new", "price": 3})
        );
    }
}
