use thiserror::Error;

use crate::DocumentId;

/// Failures raised by a document store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(#[from] sled::Error),

    #[error("document encoding failure: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("document must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("document {id} already exists in '{collection}'")]
    DuplicateId { collection: String, id: DocumentId },
}

pub type StoreResult<T> = Result<T, StoreError>;
