//! Cache Module
//!
//! Provides the in-memory note cache with TTL expiration and LRU eviction.

mod clock;
mod entry;
mod lru;
mod manager;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruOrder;
pub use manager::{NoteCacheManager, SharedCache};
pub use stats::CacheStats;
pub use store::NoteCache;

pub(crate) use manager::lock_cache;

// == Public Constants ==
/// Default maximum number of cached notes
pub const DEFAULT_CAPACITY: usize = 50;

/// Default idle time before a note is stale (10 minutes)
pub const DEFAULT_TTL_MS: u64 = 600_000;

/// Default period between background sweeps (2 minutes)
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 120_000;
