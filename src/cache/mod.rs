//! Cache Module
//!
//! Provides a fixed-capacity in-memory cache with LRU eviction.

mod arena;
mod entry;
mod list;
mod stats;
mod store;
mod traits;


// Re-export public types
pub use arena::Handle;
pub use entry::CacheEntry;
pub use list::{Iter, RecencyList};
pub use stats::CacheStats;
pub use store::LruCache;
pub use traits::Cache;
