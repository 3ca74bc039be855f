//! Best Stories Service
//!
//! Consumer-facing retrieval over the story cache. Rides out a cold cache with
//! a bounded number of delayed re-reads.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::cache::StoryCache;
use crate::config::Config;
use crate::error::{Result, StoryError};
use crate::models::Story;

// == Best Stories Service ==
/// Serves the top `count` stories from whatever snapshot the cache holds.
#[derive(Clone)]
pub struct BestStoriesService {
    cache: Arc<dyn StoryCache>,
    retry_delay: Duration,
    max_retry_attempts: u32,
}

impl BestStoriesService {
    // == Constructor ==
    /// # Arguments
    /// * `cache` - Shared story cache, also fed by the recycle scheduler
    /// * `retry_delay` - Wait between reads while the cache is unpopulated
    /// * `max_retry_attempts` - Re-reads allowed after the initial read
    pub fn new(
        cache: Arc<dyn StoryCache>,
        retry_delay: Duration,
        max_retry_attempts: u32,
    ) -> Self {
        Self {
            cache,
            retry_delay,
            max_retry_attempts,
        }
    }

    /// Creates the service with retry settings taken from the Config.
    pub fn from_config(cache: Arc<dyn StoryCache>, config: &Config) -> Self {
        Self::new(cache, config.retry_delay(), config.cache_max_retry_attempts)
    }

    pub fn cache(&self) -> &Arc<dyn StoryCache> {
        &self.cache
    }

    // == Get Best ==
    /// Returns the first `count` stories of the current snapshot, in rank order.
    ///
    /// While the cache is unpopulated it waits `retry_delay` and reads again,
    /// at most `max_retry_attempts` times. Cancellation during a wait yields an
    /// empty list, even if no attempts remain. Running out of attempts fails with
    /// [`StoryError::ExceededRetryAttempts`].
    pub async fn get_best(&self, count: usize, cancel: &CancellationToken) -> Result<Vec<Story>> {
        let result = self.read_with_retry(count, cancel).await;
        if let Err(e) = &result {
            error!("get_best({}) failed: {}", count, e);
        }
        result
    }

    async fn read_with_retry(
        &self,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<Story>> {
        let mut attempt: u32 = 0;
        let mut snapshot = self.cache.read(cancel).await?;

        while snapshot.is_none() {
            // Shutdown wins over exhaustion so callers can tell the two apart
            if cancel.is_cancelled() {
                return Ok(Vec::new());
            }
            if attempt >= self.max_retry_attempts {
                return Err(StoryError::ExceededRetryAttempts(self.max_retry_attempts));
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(Vec::new()),
                _ = tokio::time::sleep(self.retry_delay) => {}
            }

            attempt += 1;
            debug!("Story cache unpopulated, retry {} of {}", attempt, self.max_retry_attempts);
            snapshot = self.cache.read(cancel).await?;
        }

        // Snapshots are stored in rank order, no re-sort needed
        Ok(snapshot.map(|s| s.top(count)).unwrap_or_default())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::cache::{CacheStrategy, RwLockCache};
    use crate::models::Snapshot;

    /// Cache that reports unpopulated for the first `empty_reads` reads.
    struct WarmingCache {
        empty_reads: usize,
        reads: AtomicUsize,
        snapshot: Snapshot,
    }

    impl WarmingCache {
        fn new(empty_reads: usize) -> Self {
            let stories = (1..=10).map(|id| Story::new(id, 100 - id as i64)).collect();
            Self {
                empty_reads,
                reads: AtomicUsize::new(0),
                snapshot: Snapshot::ranked(stories, 10),
            }
        }

        fn never() -> Self {
            Self::new(usize::MAX)
        }
    }

    #[async_trait]
    impl StoryCache for WarmingCache {
        async fn recycle(&self, _snapshot: Snapshot) {}

        async fn read(&self, _cancel: &CancellationToken) -> Result<Option<Snapshot>> {
            let previous = self.reads.fetch_add(1, Ordering::SeqCst);
            Ok((previous >= self.empty_reads).then(|| self.snapshot.clone()))
        }

        fn strategy(&self) -> CacheStrategy {
            CacheStrategy::RwLock
        }
    }

    fn service(cache: Arc<dyn StoryCache>) -> BestStoriesService {
        BestStoriesService::new(cache, Duration::from_millis(100), 5)
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_reads_initial_plus_max() {
        let cache = Arc::new(WarmingCache::never());
        let service = service(cache.clone());

        let result = service.get_best(5, &CancellationToken::new()).await;

        match result {
            Err(e @ StoryError::ExceededRetryAttempts(5)) => assert!(e.to_string().contains('5')),
            other => panic!("expected exhausted retries, got {other:?}"),
        }
        assert_eq!(cache.reads.load(Ordering::SeqCst), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_once_populated() {
        let cache = Arc::new(WarmingCache::new(3));
        let service = service(cache.clone());

        let stories = service.get_best(5, &CancellationToken::new()).await.unwrap();

        assert_eq!(stories.len(), 5);
        assert_eq!(cache.reads.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_during_wait_returns_empty() {
        let cache = Arc::new(WarmingCache::never());
        let service = service(cache);
        let cancel = CancellationToken::new();

        let task = {
            let cancel = cancel.clone();
            tokio::spawn(async move { service.get_best(5, &cancel).await })
        };
        tokio::time::sleep(Duration::from_millis(150)).await;
        cancel.cancel();

        let stories = task.await.unwrap().unwrap();
        assert!(stories.is_empty());
    }

    #[tokio::test]
    async fn test_populated_cache_returns_prefix_in_rank_order() {
        let cache = Arc::new(RwLockCache::new());
        cache
            .recycle(Snapshot::ranked(
                vec![Story::new(1, 10), Story::new(2, 50), Story::new(3, 30)],
                3,
            ))
            .await;
        let service = service(cache);

        let stories = service.get_best(2, &CancellationToken::new()).await.unwrap();
        let ids: Vec<u64> = stories.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_count_above_length_returns_everything() {
        let cache = Arc::new(RwLockCache::new());
        cache
            .recycle(Snapshot::ranked(vec![Story::new(1, 1)], 3))
            .await;
        let service = service(cache);

        let stories = service.get_best(50, &CancellationToken::new()).await.unwrap();
        assert_eq!(stories.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_fails_after_single_read() {
        let cache = Arc::new(WarmingCache::never());
        let service = BestStoriesService::new(cache.clone(), Duration::from_millis(100), 0);

        let result = service.get_best(1, &CancellationToken::new()).await;

        assert!(matches!(result, Err(StoryError::ExceededRetryAttempts(0))));
        assert_eq!(cache.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_with_no_retries_left_returns_empty() {
        let cache = Arc::new(WarmingCache::never());
        let service = BestStoriesService::new(cache.clone(), Duration::from_millis(100), 0);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let stories = service.get_best(1, &cancel).await.unwrap();

        assert!(stories.is_empty());
        assert_eq!(cache.reads.load(Ordering::SeqCst), 1);
    }
}
