//! Cache Entry Module
//!
//! Defines the payload stored in each recency list node.

// == Cache Entry ==
/// A key-value pair owned by the recency list.
///
/// The key is kept next to the value so that evicting the list's back node
/// tells the cache which index entry to drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    // == Replace Value ==
    /// Swaps in a new value and returns the previous one.
    pub fn replace(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Splits the entry into its key and value.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}
