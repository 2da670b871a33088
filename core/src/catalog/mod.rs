// storefront/src/catalog/mod.rs

//! The product catalog: record format, persistence backends, the CRUD store
//! and the listing filter.

pub mod backend;
pub mod product;
pub mod query;
pub mod seed;
pub mod store;

pub use backend::{CatalogBackend, FileBackend, MemoryBackend, DEFAULT_RECORD_NAME};
pub use product::{Product, ProductDraft, CATEGORIES};
pub use query::{CatalogQuery, CategoryFilter, ALL_CATEGORIES_LABEL};
pub use seed::default_catalog;
pub use store::{CatalogEvent, CatalogListener, CatalogStore};
