//! Note Fetch Module
//!
//! Request-level helpers that sit in front of a note source: bounded retry
//! with exponential backoff, and a cache-aside load through the note cache.
//! The cache stays passive; these helpers are what populates it on a miss.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{Clock, NoteCacheManager};
use crate::error::{FetchError, Result};

// == Note Source ==
/// Anything that can load a full note payload by id, typically the
/// backend API client.
pub trait NoteSource: Send + Sync {
    type Note: Send + Sync + 'static;

    fn fetch_note(&self, id: &str) -> impl Future<Output = Result<Self::Note>> + Send;
}

// == Retry Policy ==
/// Exponential backoff for transient fetch failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub base_delay: Duration,
    /// Cap on any single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(31);
        self.base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

// == Fetch With Retry ==
/// Fetches a note, retrying transient failures according to `policy`.
///
/// Non-retryable errors are returned as-is on the first occurrence. When
/// every attempt fails transiently the last error is wrapped in
/// [`FetchError::Exhausted`].
pub async fn fetch_with_retry<S>(source: &S, id: &str, policy: &RetryPolicy) -> Result<S::Note>
where
    S: NoteSource,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match source.fetch_note(id).await {
            Ok(note) => return Ok(note),
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    id,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "note fetch failed, retrying: {}",
                    err
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) if err.is_retryable() => {
                return Err(FetchError::Exhausted {
                    id: id.to_string(),
                    attempts: attempt,
                    last: Box::new(err),
                });
            }
            Err(err) => return Err(err),
        }
    }
}

// == Cache-Aside Fetch ==
/// Returns the cached note for `id`, loading and caching it on a miss.
///
/// Failed loads leave the cache untouched. Two concurrent misses for the
/// same id both hit the source; the later `set` wins.
pub async fn fetch_note_cached<S, C>(
    cache: &NoteCacheManager<S::Note, C>,
    source: &S,
    id: &str,
    policy: &RetryPolicy,
) -> Result<Arc<S::Note>>
where
    S: NoteSource,
    C: Clock,
{
    if let Some(note) = cache.get(id) {
        debug!(id, "note served from cache");
        return Ok(note);
    }

    let note = fetch_with_retry(source, id, policy).await?;
    Ok(cache.set(id, note))
}
