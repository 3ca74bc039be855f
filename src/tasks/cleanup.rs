//! Store Cleanup Task
//!
//! Background task that periodically removes expired store entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns a background task that periodically sweeps expired store entries.
///
/// Expired entries already read as absent; the sweep only reclaims memory for
/// keys nobody asks for again.
///
/// # Arguments
/// * `store` - Shared store to sweep
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
/// * `cancel` - Stops the task at its next suspension point
pub fn spawn_cleanup_task(
    store: Arc<MemoryStore>,
    cleanup_interval_secs: u64,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting store cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }

            let removed = store.cleanup_expired().await;

            if removed > 0 {
                info!(
                    "Store cleanup: removed {} expired entries, {} remaining",
                    removed,
                    store.len().await
                );
            } else {
                debug!("Store cleanup: no expired entries found");
            }
        }

        info!("Store cleanup task stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ExpiringStore;

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_removes_expired_entries() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("expire_soon", b"value".to_vec(), Some(Duration::from_secs(1)))
            .await
            .unwrap();

        let cancel = CancellationToken::new();
        let handle = spawn_cleanup_task(store.clone(), 1, cancel.clone());

        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(store.len().await, 0, "Expired entry should have been swept");

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_preserves_valid_entries() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("long_lived", b"value".to_vec(), Some(Duration::from_secs(3600)))
            .await
            .unwrap();

        let cancel = CancellationToken::new();
        let handle = spawn_cleanup_task(store.clone(), 1, cancel.clone());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(store.get("long_lived").await.unwrap(), Some(b"value".to_vec()));

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_cleanup_task_stops_on_cancel() {
        let store = Arc::new(MemoryStore::new());
        let cancel = CancellationToken::new();

        let handle = spawn_cleanup_task(store, 1, cancel.clone());
        cancel.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("cleanup task should stop promptly")
            .unwrap();
    }
}
