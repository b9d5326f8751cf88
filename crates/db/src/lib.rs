//! Document store for bookshelf.
//!
//! Records live in named collections as JSON objects keyed by a
//! [`DocumentId`]. Two backends implement [`DocumentStore`]: [`MemoryStore`]
//! for tests and throwaway runs, and [`SledStore`] for on-disk persistence.
//! Application code talks to a typed [`Collection`] instead of the raw store.

use std::path::PathBuf;
use std::sync::Arc;

mod collection;
mod error;
mod id;
mod memory;
mod sled_store;
mod store;

pub use collection::{Collection, Document};
pub use error::{StoreError, StoreResult};
pub use id::DocumentId;
pub use memory::MemoryStore;
pub use sled_store::SledStore;
pub use store::{DocumentStore, RawDocument, ID_FIELD};

/// Shared handle to whichever backend was opened at startup.
pub type StoreHandle = Arc<dyn DocumentStore>;

/// Backend selection for [`open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    Sled { path: PathBuf },
}

/// Open the configured backend.
pub fn open(config: &StoreConfig) -> StoreResult<StoreHandle> {
    let store: StoreHandle = match config {
        StoreConfig::Memory => {
            tracing::info!(target: "bookshelf-db", backend = "memory", "document store opened");
            Arc::new(MemoryStore::new())
        }
        StoreConfig::Sled { path } => Arc::new(SledStore::open(path)?),
    };
    Ok(store)
}
