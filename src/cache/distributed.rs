//! TTL-backed story cache with admission-controlled rebuild
//!
//! The snapshot lives in an external expiring store. When the entry is missing
//! or has expired, exactly one caller per process rebuilds it from upstream
//! while the others wait on the admission lock and then pick up the result.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::cache::{CacheStrategy, StoryCache};
use crate::error::Result;
use crate::fetcher::{fetch_ranked_snapshot, StoryFetcher};
use crate::models::Snapshot;
use crate::store::{ExpiringStore, BEST_STORIES_KEY};

// == Distributed Cache ==
/// Story cache stored as JSON under a fixed key in an [`ExpiringStore`].
pub struct DistributedCache {
    store: Arc<dyn ExpiringStore>,
    fetcher: Arc<dyn StoryFetcher>,
    /// Held across the rebuild fetch so concurrent misses collapse into one
    admission: Mutex<()>,
    ttl: Duration,
    max_size: usize,
}

impl DistributedCache {
    // == Constructor ==
    /// # Arguments
    /// * `store` - External store holding the serialized snapshot
    /// * `fetcher` - Upstream source used on rebuild
    /// * `ttl` - Expiry applied to every write
    /// * `max_size` - Snapshot length limit
    pub fn new(
        store: Arc<dyn ExpiringStore>,
        fetcher: Arc<dyn StoryFetcher>,
        ttl: Duration,
        max_size: usize,
    ) -> Self {
        Self {
            store,
            fetcher,
            admission: Mutex::new(()),
            ttl,
            max_size,
        }
    }

    // == Lookup ==
    /// Reads and decodes the stored snapshot. An empty payload counts as a miss.
    ///
    /// The payload may have been written by an instance with a larger max size,
    /// so it is re-ranked and truncated to this cache's limit.
    async fn lookup(&self) -> Result<Option<Snapshot>> {
        let bytes = match self.store.get(BEST_STORIES_KEY).await? {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Ok(None),
        };

        let stored = Snapshot::from_json(&bytes).map_err(|e| {
            error!("Stored best stories payload is corrupt: {}", e);
            e
        })?;

        if stored.len() <= self.max_size {
            return Ok(Some(stored));
        }
        Ok(Some(Snapshot::ranked(stored.to_vec(), self.max_size)))
    }

    // == Persist ==
    async fn persist(&self, snapshot: &Snapshot) -> Result<()> {
        let bytes = snapshot.to_json()?;
        self.store
            .set(BEST_STORIES_KEY, bytes, Some(self.ttl))
            .await
    }

    // == Rebuild ==
    /// Rebuilds the stored snapshot from upstream under the admission lock.
    ///
    /// The guard is released on every return path, errors included.
    async fn rebuild(&self, cancel: &CancellationToken) -> Result<Option<Snapshot>> {
        let _admission = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(None),
            guard = self.admission.lock() => guard,
        };

        // Another caller may have rebuilt while we waited for admission
        if let Some(snapshot) = self.lookup().await? {
            debug!("Best stories rebuilt by a concurrent caller");
            return Ok(Some(snapshot));
        }

        info!("Best stories cache miss, rebuilding from upstream");

        let Some(snapshot) =
            fetch_ranked_snapshot(self.fetcher.as_ref(), self.max_size, cancel).await?
        else {
            return Ok(None);
        };

        self.persist(&snapshot).await?;
        info!(
            "Cached {} best stories for {}s",
            snapshot.len(),
            self.ttl.as_secs()
        );

        Ok(Some(snapshot))
    }
}

#[async_trait]
impl StoryCache for DistributedCache {
    async fn recycle(&self, snapshot: Snapshot) {
        if let Err(e) = self.persist(&snapshot).await {
            error!("Failed to recycle best stories cache: {}", e);
        }
    }

    async fn read(&self, cancel: &CancellationToken) -> Result<Option<Snapshot>> {
        if let Some(snapshot) = self.lookup().await? {
            debug!("Best stories cache hit");
            return Ok(Some(snapshot));
        }

        self.rebuild(cancel).await
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::Distributed
    }
}
