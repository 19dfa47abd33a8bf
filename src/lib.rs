//! Note Cache - A bounded in-memory cache for full note payloads
//!
//! Provides idle-time (TTL) expiration, LRU eviction and a periodic
//! background sweep, plus cache-aside fetch helpers for a note source.

pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod fetch;
pub mod tasks;

pub use cache::{CacheStats, Clock, ManualClock, NoteCache, NoteCacheManager, SystemClock};
pub use config::{CacheConfig, Config};
pub use error::{ConsoleError, FetchError};
pub use fetch::{fetch_note_cached, fetch_with_retry, NoteSource, RetryPolicy};
pub use tasks::spawn_sweep_task;
