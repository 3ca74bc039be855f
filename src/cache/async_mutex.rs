//! Async mutex story cache

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::cache::{CacheStrategy, StoryCache};
use crate::error::Result;
use crate::models::Snapshot;

/// Story cache guarded by tokio's async mutex.
///
/// The mutex is a single-permit semaphore: waiters suspend instead of
/// blocking their worker thread, and the guard may be held across awaits.
#[derive(Debug, Default)]
pub struct AsyncMutexCache {
    slot: Mutex<Option<Snapshot>>,
}

impl AsyncMutexCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoryCache for AsyncMutexCache {
    async fn recycle(&self, snapshot: Snapshot) {
        *self.slot.lock().await = Some(snapshot);
    }

    async fn read(&self, _cancel: &CancellationToken) -> Result<Option<Snapshot>> {
        Ok(self.slot.lock().await.clone())
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::Semaphore
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::models::Story;

    #[tokio::test(start_paused = true)]
    async fn test_read_waits_for_permit() {
        let cache = Arc::new(AsyncMutexCache::new());
        let guard = cache.slot.lock().await;

        let reader = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.read(&CancellationToken::new()).await })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!reader.is_finished());

        drop(guard);
        cache
            .recycle(Snapshot::ranked(vec![Story::new(1, 1)], 10))
            .await;

        // The reader either ran before or after the recycle; both are valid
        let read = reader.await.unwrap().unwrap();
        assert!(read.map_or(true, |s| s.len() == 1));
    }
}
