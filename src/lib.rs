//! Recency Cache - a fixed-capacity LRU cache
//!
//! An [`LruCache`] pairs a `HashMap` index with a [`RecencyList`] whose nodes
//! live in a generational arena, giving O(1) `set`, `get` and eviction
//! without raw pointers.
//!
//! ```
//! use recency_cache::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! assert!(!cache.set("a", 1));
//! assert!(!cache.set("b", 2));
//! assert_eq!(cache.get(&"a"), Some(&1));
//! cache.set("c", 3); // evicts "b"
//! assert_eq!(cache.get(&"b"), None);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod replay;

pub use cache::{Cache, CacheStats, LruCache, RecencyList};
pub use config::Config;
pub use error::{CacheError, Result};
