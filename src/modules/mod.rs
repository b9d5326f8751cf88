pub mod authors;
pub mod books;
mod openapi;
#[cfg(test)]
mod testutils;

use bookshelf_db::StoreHandle;
use bookshelf_kernel::ModuleRegistry;

/// Register every resource module, all sharing `store`
pub fn register_all(registry: &mut ModuleRegistry, store: StoreHandle) -> anyhow::Result<()> {
    registry.register(authors::create_module(store.clone()))?;
    registry.register(books::create_module(store))?;
    Ok(())
}
