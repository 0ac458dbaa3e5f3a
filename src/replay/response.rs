//! Replay response models
//!
//! Each executed command produces exactly one JSON line.

use serde::Serialize;

use crate::cache::CacheStats;

/// Outcome of a successfully parsed command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Response {
    Set {
        key: String,
        /// `true` if the key existed and its value was replaced
        updated: bool,
    },
    Get {
        key: String,
        found: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Del {
        key: String,
        removed: bool,
    },
    Clear {
        cleared: usize,
    },
    Len {
        len: usize,
        capacity: usize,
    },
    Stats(StatsResponse),
}

/// Counters plus the derived hit rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Emitted for lines that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// 1-based input line number
    pub line: usize,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(line: usize, error: impl Into<String>) -> Self {
        Self {
            line,
            error: error.into(),
        }
    }
}
