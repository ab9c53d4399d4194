//! Product data suppliers.

mod json_catalog;

pub use json_catalog::JsonFileCatalog;
