//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its replay driver.
///
/// Cache misses are not errors; `get` reports them as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Cache constructed with a capacity that cannot hold a single entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Recency list handle whose node has already been removed
    #[error("Stale handle: slot {index} generation {generation}")]
    StaleHandle { index: usize, generation: u64 },

    /// Malformed replay command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Unusable configuration value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
