// file: src/catalog/mod.rs
// description: repository catalog persistence
// reference: internal module structure

pub mod store;

pub use store::CatalogStore;
