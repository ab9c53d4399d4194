//! Product image loading and caching.

mod loader;
mod memory_cache;

pub use loader::{ImageLoadedEvent, ImageLoader, ImageLoaderConfig};
pub use memory_cache::{CacheStats, DEFAULT_CACHE_SIZE, MemoryImageCache};
