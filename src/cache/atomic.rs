//! Lock-free story cache

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cache::{CacheStrategy, StoryCache};
use crate::error::Result;
use crate::models::{Snapshot, Story};

/// Story cache backed by an atomically swappable pointer.
///
/// Reads never block: they load the current pointer with acquire ordering and
/// always see the latest completed swap.
///
/// Recycle is a single compare-and-swap against the pointer it just loaded,
/// without retry. With concurrent recyclers the loser's snapshot is dropped
/// and logged; the next cycle installs a fresh one. With the usual single
/// writer the swap cannot fail.
#[derive(Debug, Default)]
pub struct AtomicCache {
    slot: ArcSwapOption<Vec<Story>>,
}

impl AtomicCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoryCache for AtomicCache {
    async fn recycle(&self, snapshot: Snapshot) {
        let stories: Arc<Vec<Story>> = snapshot.into();
        let current = self.slot.load();
        let previous = self.slot.compare_and_swap(&current, Some(stories));

        let swapped = match (&*previous, &*current) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if !swapped {
            warn!("Concurrent recycle won the swap, dropping this snapshot");
        }
    }

    async fn read(&self, _cancel: &CancellationToken) -> Result<Option<Snapshot>> {
        Ok(self.slot.load_full().map(Snapshot::from))
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::Atomic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_returns_same_allocation() {
        let cache = AtomicCache::new();
        let snapshot = Snapshot::ranked(vec![Story::new(1, 1)], 10);

        cache.recycle(snapshot.clone()).await;

        let read = cache.read(&CancellationToken::new()).await.unwrap().unwrap();
        assert!(read.ptr_eq(&snapshot));
    }

    #[tokio::test]
    async fn test_recycle_replaces_populated_slot() {
        let cache = AtomicCache::new();
        cache.recycle(Snapshot::ranked(vec![Story::new(1, 1)], 10)).await;
        cache.recycle(Snapshot::ranked(vec![Story::new(2, 2)], 10)).await;

        let read = cache.read(&CancellationToken::new()).await.unwrap().unwrap();
        assert_eq!(read[0].id, 2);
    }
}
