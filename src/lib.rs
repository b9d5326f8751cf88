//! Bookshelf application library
//!
//! Wires the authors and books modules onto a document store and serves them.

use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use bookshelf_db::{StoreConfig, StoreHandle};
use bookshelf_kernel::settings::{DatabaseBackend, DatabaseSettings, ServerSettings, Settings};
use bookshelf_kernel::{InitCtx, ModuleRegistry};

pub mod modules;
pub mod validation;

/// Translate the database settings into a store to open.
pub fn store_config(settings: &DatabaseSettings) -> StoreConfig {
    match settings.backend {
        DatabaseBackend::Memory => StoreConfig::Memory,
        DatabaseBackend::Sled => StoreConfig::Sled {
            path: PathBuf::from(&settings.path),
        },
    }
}

/// Registry holding every resource module over `store`.
pub fn build_registry(store: StoreHandle) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store)?;
    Ok(registry)
}

/// The full HTTP application over `store`, with default server settings.
pub fn build_app(store: StoreHandle) -> anyhow::Result<Router> {
    let registry = build_registry(store)?;
    Ok(bookshelf_http::build_router(&registry, &ServerSettings::default()))
}

/// Open the store, run module lifecycles around the HTTP server, and flush
/// the store on the way out.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let store = bookshelf_db::open(&store_config(&settings.database))
        .context("failed to open document store")?;

    let registry = build_registry(store.clone())?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        modules = registry.module_count(),
        "bookshelf starting"
    );

    let served = bookshelf_http::start_server(&registry, &settings.server).await;

    registry.stop_modules().await?;
    store.flush().await.context("failed to flush document store")?;

    tracing::info!("bookshelf stopped");
    served
}
