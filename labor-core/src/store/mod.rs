//! Local key/value persistence.
//!
//! Values are JSON strings under fixed keys. Backends implement
//! [`KeyValueStore`] and are picked at startup through a [`StoreRegistry`].

pub mod factory;
pub mod memory;
pub mod preferences;

use thiserror::Error;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use memory::MemoryStore;
pub use preferences::{DARK_MODE_KEY, HISTORY_KEY, INPUTS_KEY_PREFIX, Preferences};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// String-keyed storage of serialized values.
///
/// Writes go straight through to the backing medium; there is no separate
/// flush step.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`.
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError>;
}
