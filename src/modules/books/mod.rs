pub mod models;
pub mod routes;
pub mod validation;

use async_trait::async_trait;
use axum::Router;
use bookshelf_db::StoreHandle;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use super::openapi;

/// Books resource mounted at `/api/books`
pub struct BooksModule {
    store: StoreHandle,
}

impl BooksModule {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::resource_fragment(
            "Books",
            "Book",
            json!({
                "Book": {
                    "type": "object",
                    "properties": {
                        "_id": {"type": "string", "format": "uuid"},
                        "title": {"type": "string", "minLength": 3, "maxLength": 200},
                        "author": {
                            "description": "Author reference on writes; the referenced author, or null, on reads",
                            "oneOf": [
                                {"type": "string"},
                                {"$ref": "#/components/schemas/Author"},
                                {"type": "null"}
                            ]
                        },
                        "description": {"type": "string", "minLength": 5},
                        "price": {"type": "number", "minimum": 0}
                    },
                    "required": ["_id", "title", "author", "description", "price"]
                },
                "BookInput": {
                    "type": "object",
                    "properties": {
                        "title": {"type": "string", "minLength": 3, "maxLength": 200},
                        "author": {"type": "string"},
                        "description": {"type": "string", "minLength": 5},
                        "price": {"type": "number", "minimum": 0}
                    },
                    "required": ["title", "author", "description", "price"],
                    "additionalProperties": false
                },
                "BookUpdate": {
                    "type": "object",
                    "properties": {
                        "title": {"type": "string", "minLength": 3, "maxLength": 200},
                        "author": {"type": "string"},
                        "description": {"type": "string", "minLength": 5},
                        "price": {"type": "number", "minimum": 0}
                    },
                    "additionalProperties": false
                }
            }),
        ))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(store: StoreHandle) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(store))
}
