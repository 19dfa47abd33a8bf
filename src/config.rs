//! Configuration Module
//!
//! Handles loading cache and fetch settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_SWEEP_INTERVAL_MS, DEFAULT_TTL_MS};
use crate::fetch::RetryPolicy;

/// Shape of a note cache, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub capacity: usize,
    /// Idle time after which an entry is stale
    pub ttl: Duration,
    /// Period of the background staleness sweep
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl: Duration::from_millis(DEFAULT_TTL_MS),
            sweep_interval: Duration::from_millis(DEFAULT_SWEEP_INTERVAL_MS),
        }
    }
}

/// Application configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cached notes
    pub capacity: usize,
    /// Idle time in milliseconds before a note is stale
    pub ttl_ms: u64,
    /// Background sweep interval in milliseconds
    pub sweep_interval_ms: u64,
    /// Attempts per note fetch, including the first
    pub fetch_max_attempts: u32,
    /// Delay before the first fetch retry in milliseconds
    pub fetch_retry_base_ms: u64,
    /// Upper bound on any single retry delay in milliseconds
    pub fetch_retry_max_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `NOTE_CACHE_CAPACITY` - Maximum cached notes (default: 50)
    /// - `NOTE_CACHE_TTL_MS` - Idle TTL in milliseconds (default: 600000)
    /// - `NOTE_CACHE_SWEEP_INTERVAL_MS` - Sweep period in milliseconds (default: 120000)
    /// - `NOTE_FETCH_MAX_ATTEMPTS` - Fetch attempts (default: 3)
    /// - `NOTE_FETCH_RETRY_BASE_MS` - First retry delay (default: 200)
    /// - `NOTE_FETCH_RETRY_MAX_MS` - Retry delay cap (default: 5000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("NOTE_CACHE_CAPACITY", defaults.capacity),
            ttl_ms: env_or("NOTE_CACHE_TTL_MS", defaults.ttl_ms),
            sweep_interval_ms: env_or("NOTE_CACHE_SWEEP_INTERVAL_MS", defaults.sweep_interval_ms),
            fetch_max_attempts: env_or("NOTE_FETCH_MAX_ATTEMPTS", defaults.fetch_max_attempts),
            fetch_retry_base_ms: env_or("NOTE_FETCH_RETRY_BASE_MS", defaults.fetch_retry_base_ms),
            fetch_retry_max_ms: env_or("NOTE_FETCH_RETRY_MAX_MS", defaults.fetch_retry_max_ms),
        }
    }

    /// Cache shape derived from this configuration.
    pub fn cache(&self) -> CacheConfig {
        CacheConfig {
            capacity: self.capacity.max(1),
            ttl: Duration::from_millis(self.ttl_ms),
            sweep_interval: Duration::from_millis(self.sweep_interval_ms.max(1)),
        }
    }

    /// Retry policy for note fetches derived from this configuration.
    pub fn retry(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.fetch_max_attempts.max(1),
            base_delay: Duration::from_millis(self.fetch_retry_base_ms),
            max_delay: Duration::from_millis(self.fetch_retry_max_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl_ms: DEFAULT_TTL_MS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
            fetch_max_attempts: 3,
            fetch_retry_base_ms: 200,
            fetch_retry_max_ms: 5_000,
        }
    }
}

/// Parses `name` from the environment, falling back to `default` when
/// unset or malformed.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
