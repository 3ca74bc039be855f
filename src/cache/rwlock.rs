//! Reader-writer locked story cache

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::cache::{CacheStrategy, StoryCache};
use crate::error::Result;
use crate::models::Snapshot;

/// Story cache where reads share the lock and a recycle takes it exclusively.
///
/// Suited to the expected traffic: many request handlers reading, one
/// scheduler writing once per cycle.
#[derive(Debug, Default)]
pub struct RwLockCache {
    slot: RwLock<Option<Snapshot>>,
}

impl RwLockCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoryCache for RwLockCache {
    async fn recycle(&self, snapshot: Snapshot) {
        *self.slot.write().await = Some(snapshot);
    }

    async fn read(&self, _cancel: &CancellationToken) -> Result<Option<Snapshot>> {
        Ok(self.slot.read().await.clone())
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::RwLock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Story;

    #[tokio::test]
    async fn test_readers_share_lock() {
        let cache = RwLockCache::new();
        cache
            .recycle(Snapshot::ranked(vec![Story::new(1, 1)], 10))
            .await;

        // A held read guard must not block another reader
        let guard = cache.slot.read().await;
        let read = cache.read(&CancellationToken::new()).await.unwrap();
        drop(guard);

        assert_eq!(read.map(|s| s.len()), Some(1));
    }
}
