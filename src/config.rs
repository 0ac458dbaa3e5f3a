//! Configuration Module
//!
//! Handles loading and validating cache configuration.

use std::env;

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Environment variable holding the cache capacity.
pub const CAPACITY_ENV: &str = "CACHE_CAPACITY";

/// Default number of entries when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Cache configuration parameters.
///
/// Can be deserialized from an application's own config file, or loaded
/// from the environment with [`Config::from_env`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    ///
    /// Only an unset variable falls back to the default. A value that is
    /// set but not a non-negative integer is rejected.
    pub fn from_env() -> Result<Self> {
        let capacity = match env::var(CAPACITY_ENV) {
            Ok(raw) => parse_capacity(&raw)?,
            Err(env::VarError::NotPresent) => DEFAULT_CAPACITY,
            Err(env::VarError::NotUnicode(raw)) => {
                return Err(CacheError::InvalidConfig(format!(
                    "{} is not valid unicode: {:?}",
                    CAPACITY_ENV, raw
                )))
            }
        };
        Ok(Self { capacity })
    }

    /// Rejects settings the cache cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig(format!(
                "{} must be at least 1",
                CAPACITY_ENV
            )));
        }
        Ok(())
    }
}

fn parse_capacity(raw: &str) -> Result<usize> {
    raw.trim().parse().map_err(|_| {
        CacheError::InvalidConfig(format!(
            "{} must be a positive integer, got '{}'",
            CAPACITY_ENV, raw
        ))
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
