//! Staleness Sweep Task
//!
//! Background task that periodically removes stale cache entries, so memory
//! is reclaimed even for notes that are never requested again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{lock_cache, Clock, SharedCache};

/// Spawns a task that sweeps stale entries every `interval`.
///
/// The task runs until its handle is aborted. The cache lock is held only
/// for the duration of a single sweep and never across an await point.
///
/// # Example
/// ```ignore
/// let handle = spawn_sweep_task(cache.clone(), Duration::from_secs(120));
/// // Later, on teardown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task<V, C>(cache: SharedCache<V, C>, interval: Duration) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
    C: Clock,
{
    tokio::spawn(async move {
        debug!(interval_ms = interval.as_millis() as u64, "note cache sweep task running");

        loop {
            tokio::time::sleep(interval).await;

            let removed = lock_cache(&cache).sweep_expired();

            if removed > 0 {
                info!("note cache sweep: removed {} stale entries", removed);
            } else {
                debug!("note cache sweep: no stale entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, NoteCache};
    use crate::config::CacheConfig;
    use std::sync::{Arc, Mutex};

    fn shared(ttl_ms: u64, clock: ManualClock) -> SharedCache<String, ManualClock> {
        let config = CacheConfig {
            capacity: 50,
            ttl: Duration::from_millis(ttl_ms),
            sweep_interval: Duration::from_millis(1000),
        };
        Arc::new(Mutex::new(NoteCache::with_clock(&config, clock)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_task_removes_stale_entries() {
        let clock = ManualClock::new(0);
        let cache = shared(100, clock.clone());

        lock_cache(&cache).set("expire_soon", "value".to_string());
        clock.set(200);

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(1000));
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(
            !lock_cache(&cache).contains("expire_soon"),
            "stale entry should have been swept"
        );

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_task_preserves_fresh_entries() {
        let clock = ManualClock::new(0);
        let cache = shared(60_000, clock.clone());

        lock_cache(&cache).set("long_lived", "value".to_string());
        clock.set(1_000);

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(1000));
        tokio::time::sleep(Duration::from_millis(3500)).await;

        let value = lock_cache(&cache).get("long_lived");
        assert_eq!(value.as_deref().map(String::as_str), Some("value"));

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_task_runs_repeatedly() {
        let clock = ManualClock::new(0);
        let cache = shared(100, clock.clone());

        let handle = spawn_sweep_task(cache.clone(), Duration::from_millis(1000));

        lock_cache(&cache).set("first", "1".to_string());
        clock.set(500);
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(!lock_cache(&cache).contains("first"));

        lock_cache(&cache).set("second", "2".to_string());
        clock.set(1_000);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!lock_cache(&cache).contains("second"));
        assert_eq!(lock_cache(&cache).stats().expirations, 2);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let cache = shared(100, ManualClock::new(0));

        let handle = spawn_sweep_task(cache, Duration::from_secs(1));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "task should be finished after abort");
    }
}
