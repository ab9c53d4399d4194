pub mod catalog_feed;

pub use catalog_feed::{CatalogFeed, FetchKind};
