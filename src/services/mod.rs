// Service exports
pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryCatalog;
pub use postgres::PostgresCatalog;
pub use store::{CatalogStore, StoreError};
