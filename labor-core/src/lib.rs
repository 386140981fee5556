pub mod advice;
pub mod calculations;
pub mod charts;
pub mod format;
pub mod history;
pub mod models;
pub mod store;

pub use history::{HISTORY_CAPACITY, HistoryStore};
pub use models::*;
pub use store::{KeyValueStore, StoreError};
