pub mod config;
pub mod export;
pub mod forms;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod state;
pub mod svg;
pub mod workflow;

use labor_core::store::StoreRegistry;
use labor_store_file::FileStoreFactory;

/// Registry with every storage backend this binary ships.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::with_builtin();
    registry.register(Box::new(FileStoreFactory));
    registry
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    #[test]
    fn package_inherits_workspace_metadata() {
        assert_eq!(env!("CARGO_PKG_LICENSE"), "MIT");
        assert!(!env!("CARGO_PKG_AUTHORS").is_empty());
    }
}
