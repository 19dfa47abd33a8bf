//! Note Cache Manager Module
//!
//! Thread-safe owner of the note cache and of its background sweep task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStats, Clock, NoteCache, SystemClock};
use crate::config::CacheConfig;
use crate::tasks::spawn_sweep_task;

/// Cache shared between the manager and its sweep task.
pub type SharedCache<V, C> = Arc<Mutex<NoteCache<V, C>>>;

/// Locks the cache, recovering from a poisoned mutex.
///
/// Every mutation completes before the guard is released, so a panic
/// elsewhere while holding the lock cannot leave the map half-updated.
pub(crate) fn lock_cache<V, C>(cache: &Mutex<NoteCache<V, C>>) -> MutexGuard<'_, NoteCache<V, C>> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

// == Note Cache Manager ==
/// Process-wide note cache.
///
/// Create one instance in the composition root and hand out references
/// (or an `Arc`) to consumers. All operations, including the periodic
/// sweep, are serialized behind a single mutex and never block on I/O.
///
/// The sweep task starts on construction and stops on `stop_cleanup` or
/// when the manager is dropped. Construction must happen inside a Tokio
/// runtime.
pub struct NoteCacheManager<V, C = SystemClock> {
    cache: SharedCache<V, C>,
    sweep_interval: Duration,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<V> NoteCacheManager<V, SystemClock>
where
    V: Send + Sync + 'static,
{
    /// Creates a manager reading the wall clock and starts its sweep task.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<V, C> NoteCacheManager<V, C>
where
    V: Send + Sync + 'static,
    C: Clock,
{
    // == Constructor ==
    /// Creates a manager reading time from `clock` and starts its sweep task.
    pub fn with_clock(config: &CacheConfig, clock: C) -> Self {
        let cache = Arc::new(Mutex::new(NoteCache::with_clock(config, clock)));
        let sweep_interval = config.sweep_interval.max(Duration::from_millis(1));
        let handle = spawn_sweep_task(Arc::clone(&cache), sweep_interval);

        info!(
            capacity = config.capacity.max(1),
            ttl_ms = config.ttl.as_millis() as u64,
            sweep_interval_ms = sweep_interval.as_millis() as u64,
            "note cache started"
        );

        Self {
            cache,
            sweep_interval,
            sweeper: Mutex::new(Some(handle)),
        }
    }

    /// See [`NoteCache::get`].
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        lock_cache(&self.cache).get(key)
    }

    /// See [`NoteCache::set`].
    pub fn set(&self, key: impl Into<String>, payload: impl Into<Arc<V>>) -> Arc<V> {
        lock_cache(&self.cache).set(key, payload)
    }

    /// Invalidates `key` after its note changed or was deleted upstream.
    pub fn remove(&self, key: &str) -> bool {
        lock_cache(&self.cache).remove(key)
    }

    /// Drops every entry, e.g. when the signed-in identity changes.
    pub fn clear(&self) {
        lock_cache(&self.cache).clear();
        debug!("note cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        lock_cache(&self.cache).stats()
    }

    pub fn contains(&self, key: &str) -> bool {
        lock_cache(&self.cache).contains(key)
    }

    pub fn len(&self) -> usize {
        lock_cache(&self.cache).len()
    }

    pub fn is_empty(&self) -> bool {
        lock_cache(&self.cache).is_empty()
    }

    // == Sweeper Lifecycle ==
    /// Stops the background sweep. No further sweeps run until
    /// `start_cleanup` is called. Calling it twice is harmless.
    pub fn stop_cleanup(&self) {
        let handle = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            handle.abort();
            info!("note cache sweep stopped");
        }
    }

    /// Restarts the background sweep. No-op while one is already running.
    pub fn start_cleanup(&self) {
        let mut sweeper = self.sweeper.lock().unwrap_or_else(PoisonError::into_inner);

        if sweeper.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        *sweeper = Some(spawn_sweep_task(Arc::clone(&self.cache), self.sweep_interval));
    }

    pub fn is_cleanup_running(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }
}

impl<V, C> Drop for NoteCacheManager<V, C> {
    fn drop(&mut self) {
        let handle = self
            .sweeper
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn config(capacity: usize, ttl_ms: u64, sweep_ms: u64) -> CacheConfig {
        CacheConfig {
            capacity,
            ttl: Duration::from_millis(ttl_ms),
            sweep_interval: Duration::from_millis(sweep_ms),
        }
    }

    #[tokio::test]
    async fn test_manager_round_trip() {
        let manager: NoteCacheManager<String> = NoteCacheManager::new(&config(50, 60_000, 1000));

        let stored = manager.set("note-1", "hello".to_string());
        let fetched = manager.get("note-1").unwrap();

        assert!(Arc::ptr_eq(&stored, &fetched));
        assert_eq!(manager.len(), 1);
    }

    #[tokio::test]
    async fn test_manager_remove_and_clear() {
        let manager: NoteCacheManager<u32, ManualClock> =
            NoteCacheManager::with_clock(&config(50, 1000, 1000), ManualClock::new(0));

        manager.set("a", 1u32);
        manager.set("b", 2u32);

        assert!(manager.remove("a"));
        assert!(manager.get("a").is_none());

        manager.clear();
        assert!(manager.is_empty());
        assert_eq!(manager.stats().size, 0);
        assert!(manager.get("b").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manager_sweeps_in_background() {
        let clock = ManualClock::new(0);
        let manager: NoteCacheManager<u32, ManualClock> =
            NoteCacheManager::with_clock(&config(50, 100, 1000), clock.clone());

        manager.set("stale", 1u32);
        clock.set(500);

        // Entry is stale but nothing has read it yet.
        assert!(manager.contains("stale"));

        tokio::time::sleep(Duration::from_millis(1010)).await;

        assert!(!manager.contains("stale"));
        assert_eq!(manager.stats().expirations, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cleanup_halts_sweeps() {
        let clock = ManualClock::new(0);
        let manager: NoteCacheManager<u32, ManualClock> =
            NoteCacheManager::with_clock(&config(50, 100, 1000), clock.clone());

        assert!(manager.is_cleanup_running());
        manager.stop_cleanup();
        manager.stop_cleanup();
        assert!(!manager.is_cleanup_running());

        manager.set("stale", 1u32);
        clock.set(500);
        tokio::time::sleep(Duration::from_millis(5000)).await;

        assert!(manager.contains("stale"), "no sweep after stop");
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_cleanup_resumes_sweeps() {
        let clock = ManualClock::new(0);
        let manager: NoteCacheManager<u32, ManualClock> =
            NoteCacheManager::with_clock(&config(50, 100, 1000), clock.clone());

        manager.stop_cleanup();
        manager.start_cleanup();
        manager.start_cleanup();
        assert!(manager.is_cleanup_running());

        manager.set("stale", 1u32);
        clock.set(500);
        tokio::time::sleep(Duration::from_millis(1010)).await;

        assert!(!manager.contains("stale"));
    }

    #[tokio::test]
    async fn test_zero_sweep_interval_is_clamped() {
        let manager: NoteCacheManager<u32> = NoteCacheManager::new(&config(50, 100, 0));
        assert_eq!(manager.sweep_interval(), Duration::from_millis(1));
    }
}
