use std::path::PathBuf;

use async_trait::async_trait;
use labor_core::store::{KeyValueStore, StoreConfig, StoreError, StoreFactory};
use tracing::info;

use crate::store::FileStore;

/// Directory used when the config leaves `location` empty.
///
/// Resolution order:
/// 1. **`LABOR_DATA_DIR`** if set.
/// 2. **`./.labor`** in the current working directory.
fn default_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LABOR_DATA_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from("./.labor")
}

/// [`StoreFactory`] for the `"file"` backend.
///
/// ```rust,no_run
/// use labor_core::store::StoreRegistry;
/// use labor_store_file::FileStoreFactory;
///
/// let mut registry = StoreRegistry::with_builtin();
/// registry.register(Box::new(FileStoreFactory));
/// ```
pub struct FileStoreFactory;

#[async_trait]
impl StoreFactory for FileStoreFactory {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    /// Opens the directory named by `config.location`, creating it if needed.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let dir = if config.location.trim().is_empty() {
            default_dir()
        } else {
            PathBuf::from(&config.location)
        };
        let store = FileStore::open(&dir)?;
        info!(dir = %dir.display(), "file store opened");
        Ok(Box::new(store))
    }
}
