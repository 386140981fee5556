pub mod factory;
pub mod store;

pub use factory::FileStoreFactory;
pub use store::FileStore;
