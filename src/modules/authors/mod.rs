pub mod models;
pub mod routes;
pub mod validation;

use async_trait::async_trait;
use axum::Router;
use bookshelf_db::StoreHandle;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use super::openapi;

/// Authors resource mounted at `/api/authors`
pub struct AuthorsModule {
    store: StoreHandle,
}

impl AuthorsModule {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::resource_fragment(
            "Authors",
            "Author",
            json!({
                "Author": {
                    "type": "object",
                    "properties": {
                        "_id": {"type": "string", "format": "uuid"},
                        "firstName": {"type": "string", "minLength": 3, "maxLength": 200},
                        "lastName": {"type": "string", "minLength": 3, "maxLength": 200},
                        "nationality": {"type": "string", "minLength": 2, "maxLength": 100},
                        "image": {"type": "string", "default": models::DEFAULT_IMAGE}
                    },
                    "required": ["_id", "firstName", "lastName", "nationality", "image"]
                },
                "AuthorInput": {
                    "type": "object",
                    "properties": {
                        "firstName": {"type": "string", "minLength": 3, "maxLength": 200},
                        "lastName": {"type": "string", "minLength": 3, "maxLength": 200},
                        "nationality": {"type": "string", "minLength": 2, "maxLength": 100},
                        "image": {"type": "string"}
                    },
                    "required": ["firstName", "lastName", "nationality"],
                    "additionalProperties": false
                },
                "AuthorUpdate": {
                    "type": "object",
                    "properties": {
                        "firstName": {"type": "string", "minLength": 3, "maxLength": 200},
                        "lastName": {"type": "string", "minLength": 3, "maxLength": 30},
                        "nationality": {"type": "string", "minLength": 2, "maxLength": 100},
                        "image": {"type": "string"}
                    },
                    "additionalProperties": false
                }
            }),
        ))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

/// Create a new instance of the authors module
pub fn create_module(store: StoreHandle) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorsModule::new(store))
}
