//! Cache Trait
//!
//! The minimal operation set callers program against.

use std::hash::Hash;

use crate::cache::LruCache;

/// Fixed operation set of a bounded cache.
///
/// `get` takes `&mut self` because a lookup may reorder entries.
pub trait Cache<K, V> {
    /// Stores `value`; returns `true` if `key` was already present.
    fn set(&mut self, key: K, value: V) -> bool;

    /// Returns the value for `key`, or `None` on a miss.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Drops every entry.
    fn clear(&mut self);
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn set(&mut self, key: K, value: V) -> bool {
        LruCache::set(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}
