//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ExpiringCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task ticks at the given interval and invokes
/// [`delete_expired`](ExpiringCache::delete_expired) on each tick. It holds
/// only a [`Weak`] reference to the cache: when the last strong reference is
/// dropped the next tick exits the loop, so a forgotten cache never leaks a
/// perpetual task. The returned handle can also be aborted directly, which is
/// what [`ExpiringCache::stop_sweeper`] does.
///
/// # Arguments
/// * `cache` - Weak reference to the cache to sweep
/// * `interval` - Time between sweep passes
///
/// # Returns
/// A JoinHandle for the spawned task.
pub fn spawn_sweeper<T>(cache: Weak<ExpiringCache<T>>, interval: Duration) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("starting expiry sweeper with interval {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        // The first tick of a tokio interval completes immediately; skip it
        // so the first sweep happens one full interval after construction
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let Some(cache) = cache.upgrade() else {
                debug!("cache dropped, expiry sweeper exiting");
                break;
            };

            let removed = cache.delete_expired();
            if removed > 0 {
                info!("expiry sweep removed {} stale entries", removed);
            } else {
                debug!("expiry sweep found no stale entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let cache = ExpiringCache::new(Duration::from_millis(50));
        cache.set("expire_soon".to_string(), "value".to_string());

        // Wait for the entry to expire and at least one sweep to run
        tokio::time::sleep(Duration::from_millis(200)).await;

        // No get was issued, so only the sweeper can have removed it
        assert_eq!(cache.len(), 0, "expired entry should have been swept");
    }

    #[tokio::test]
    async fn test_sweeper_preserves_fresh_entries() {
        let cache = ExpiringCache::new(Duration::from_secs(3600));
        cache.set("long_lived".to_string(), "value".to_string());

        // Give a hypothetical early sweep every chance to run
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(cache.get("long_lived"), Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_sweeper_exits_when_cache_dropped() {
        let cache = ExpiringCache::new(Duration::from_millis(20));
        cache.set("key".to_string(), "value".to_string());

        // Steal the handle so drop cannot abort it; the task must exit on
        // its own once the weak reference fails to upgrade
        let handle = cache.take_sweeper_handle().expect("sweeper should be running");

        drop(cache);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(handle.is_finished(), "sweeper should stop once cache drops");
    }

    #[tokio::test]
    async fn test_stop_sweeper_is_idempotent() {
        let cache = ExpiringCache::new(Duration::from_millis(20));
        cache.set("key".to_string(), "value".to_string());

        cache.stop_sweeper();
        cache.stop_sweeper();

        // With the sweeper stopped the stale entry stays physically present
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(cache.len(), 1);

        // Lazy expiration still applies on read
        assert_eq!(cache.get("key"), None);
        assert_eq!(cache.len(), 0);
    }
}
