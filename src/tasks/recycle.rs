//! Recycle Scheduler
//!
//! Background loop that periodically fetches the best stories, ranks them and
//! installs the result as the cache's new snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::cache::StoryCache;
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::{fetch_ranked_snapshot, StoryFetcher};

/// Outcome of one scheduler cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A snapshot of this many stories was installed
    Installed(usize),
    /// Cancellation was observed; the cache was left untouched
    Cancelled,
}

// == Recycle Scheduler ==
/// Feeds the story cache from upstream on a fixed period.
pub struct RecycleScheduler {
    cache: Arc<dyn StoryCache>,
    fetcher: Arc<dyn StoryFetcher>,
    interval: Duration,
    max_size: usize,
}

impl RecycleScheduler {
    pub fn new(
        cache: Arc<dyn StoryCache>,
        fetcher: Arc<dyn StoryFetcher>,
        interval: Duration,
        max_size: usize,
    ) -> Self {
        Self {
            cache,
            fetcher,
            interval,
            max_size,
        }
    }

    /// Creates a scheduler with period and size taken from the Config.
    pub fn from_config(
        cache: Arc<dyn StoryCache>,
        fetcher: Arc<dyn StoryFetcher>,
        config: &Config,
    ) -> Self {
        Self::new(cache, fetcher, config.recycle_delay(), config.cache_max_size)
    }

    // == Single Cycle ==
    /// Fetches ids, fetches every item, ranks, truncates and installs.
    ///
    /// Nothing is installed unless every item was fetched and no cancellation
    /// was observed.
    pub async fn recycle_once(&self, cancel: &CancellationToken) -> Result<CycleOutcome> {
        match fetch_ranked_snapshot(self.fetcher.as_ref(), self.max_size, cancel).await? {
            Some(snapshot) => {
                let installed = snapshot.len();
                self.cache.recycle(snapshot).await;
                Ok(CycleOutcome::Installed(installed))
            }
            None => Ok(CycleOutcome::Cancelled),
        }
    }

    // == Run Loop ==
    /// Runs cycles until `cancel` fires. Failed cycles are logged and the
    /// previous snapshot keeps serving.
    pub async fn run(self, cancel: CancellationToken) {
        info!(
            "Starting recycle scheduler with interval of {}ms, max size {}",
            self.interval.as_millis(),
            self.max_size
        );

        while !cancel.is_cancelled() {
            debug!("Recycle cycle starting");

            match self.recycle_once(&cancel).await {
                Ok(CycleOutcome::Installed(count)) => {
                    info!("Recycled story cache with {} stories", count)
                }
                Ok(CycleOutcome::Cancelled) => break,
                Err(e) => error!("Recycle cycle failed, keeping previous snapshot: {}", e),
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Recycle scheduler stopped");
    }
}

/// Spawns the scheduler loop onto the runtime.
///
/// # Returns
/// A JoinHandle that completes once `cancel` fires and the loop unwinds.
pub fn spawn_recycle_task(
    scheduler: RecycleScheduler,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(scheduler.run(cancel))
}
