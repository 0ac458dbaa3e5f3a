//! LRU Cache Module
//!
//! Main cache engine combining a HashMap index with a recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

use tracing::{debug, trace, warn};

use crate::cache::{CacheEntry, CacheStats, Handle, RecencyList};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Upper bound on up-front allocation, so huge capacities stay lazy.
const MAX_PREALLOCATED: usize = 4096;

// == LRU Cache ==
/// Fixed-capacity cache that evicts the least recently used entry.
///
/// Both `set` and `get` count as a use. Between calls the index and the
/// recency list hold exactly the same keys and never more than `capacity`
/// of them.
///
/// `get` reorders entries and therefore needs `&mut self`; callers sharing a
/// cache across threads must wrap it in an exclusive lock.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key to list node
    index: HashMap<K, Handle>,
    /// Entries ordered most to least recently used
    list: RecencyList<CacheEntry<K, V>>,
    /// Usage counters
    stats: CacheStats,
    /// Maximum number of entries
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity =
            NonZeroUsize::new(capacity).ok_or(CacheError::InvalidCapacity(capacity))?;
        Ok(Self::with_capacity(capacity))
    }

    /// Infallible constructor for a capacity already known to be non-zero.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        let capacity = capacity.get();
        // One extra slot: a new key is inserted before the old back is evicted
        let reserved = capacity.saturating_add(1).min(MAX_PREALLOCATED);
        debug!(capacity, "lru cache created");

        Self {
            index: HashMap::with_capacity(reserved),
            list: RecencyList::with_capacity(reserved),
            stats: CacheStats::new(),
            capacity,
        }
    }

    /// Creates a cache sized by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    // == Set ==
    /// Stores `value` under `key` and marks the key as most recently used.
    ///
    /// Returns `true` if the key was already present and its value was
    /// replaced; an update never evicts. Returns `false` for a new key, in
    /// which case the least recently used entry is evicted if the insert
    /// took the cache over capacity.
    pub fn set(&mut self, key: K, value: V) -> bool {
        if let Some(&handle) = self.index.get(&key) {
            if let Some(entry) = self.list.get_mut(handle) {
                entry.replace(value);
            }
            self.touch(handle);
            self.stats.record_update();
            return true;
        }

        let handle = self.list.push_front(CacheEntry::new(key.clone(), value));
        self.index.insert(key, handle);
        self.stats.record_insert();

        if self.list.len() > self.capacity {
            self.evict_lru();
        }

        self.stats.set_total_entries(self.list.len());
        false
    }

    // == Get ==
    /// Returns the value for `key` and marks it as most recently used.
    ///
    /// A miss returns `None` and leaves the recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&handle) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        self.touch(handle);
        self.list.get(handle).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Returns the value for `key` without counting it as a use.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.get(key)?;
        self.list.get(*handle).map(|entry| &entry.value)
    }

    /// Returns the entry that the next over-capacity insert would evict.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns `true` if `key` is resident. Does not affect recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Remove ==
    /// Removes `key` and returns its value, if present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        let entry = self.list.remove(handle).ok()?;
        self.index.remove(key);
        self.stats.set_total_entries(self.list.len());
        Some(entry.value)
    }

    // == Clear ==
    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        let dropped = self.list.len();
        self.index.clear();
        self.list.clear();
        self.stats.set_total_entries(0);
        debug!(dropped, "lru cache cleared");
    }

    // == Stats ==
    /// Returns a snapshot of the usage counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.list.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.list.iter().map(|entry| &entry.key)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    fn touch(&mut self, handle: Handle) {
        if let Err(err) = self.list.move_to_front(handle) {
            warn!(%err, "index entry points outside the recency list");
        }
    }

    fn evict_lru(&mut self) {
        if let Some(entry) = self.list.pop_back() {
            self.index.remove(&entry.key);
            self.stats.record_eviction();
            trace!(len = self.list.len(), "evicted least recently used entry");
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.list.assert_invariants();
        assert_eq!(self.index.len(), self.list.len());
        assert!(self.list.len() <= self.capacity);
        for (key, handle) in &self.index {
            let entry = self.list.get(*handle).expect("index points at a freed node");
            assert!(entry.key == *key, "index key differs from node key");
        }
    }
}
