//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired entries nobody reads.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically removes expired cache entries.
///
/// The task sleeps for `interval` between passes and each pass holds the
/// store's write lock for one full scan, so an expired entry that is never
/// read stays in memory for at most one interval past its deadline.
///
/// Only a weak reference to the cache is kept: the task ends on its next tick
/// once every other handle to the cache is gone. It can also be stopped
/// through the returned JoinHandle.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(CacheStore::new());
/// let cleanup_handle = spawn_cleanup_task(&cache, Duration::from_secs(300));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<V>(cache: &Arc<CacheStore<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    let cache: Weak<CacheStore<V>> = Arc::downgrade(cache);

    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let Some(store) = cache.upgrade() else {
                debug!("Cache dropped, stopping TTL cleanup task");
                break;
            };

            let removed = store.cleanup_expired();

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(CacheStore::new());

        cache
            .set_with_ttl("expire_soon", "value", Duration::from_millis(50))
            .unwrap();
        cache.set("forever", "value").unwrap();

        let handle = spawn_cleanup_task(&cache, Duration::from_millis(100));

        // Wait for the entry to expire and at least one pass to run
        tokio::time::sleep(Duration::from_millis(350)).await;

        // Size no longer counts it, without any read touching the key
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = Arc::new(CacheStore::new());

        cache
            .set_with_ttl("long_lived", "value", Duration::from_secs(3600))
            .unwrap();

        let handle = spawn_cleanup_task(&cache, Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get("long_lived"), Some("value"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache: Arc<CacheStore> = Arc::new(CacheStore::new());

        let handle = spawn_cleanup_task(&cache, Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }

    #[tokio::test]
    async fn test_cleanup_task_stops_when_cache_dropped() {
        let cache: Arc<CacheStore> = Arc::new(CacheStore::new());

        let handle = spawn_cleanup_task(&cache, Duration::from_millis(20));
        drop(cache);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("task should exit after the cache is dropped")
            .unwrap();
    }
}
