//! Fetcher Module
//!
//! Boundary to the upstream story index, plus the fetch/rank/truncate routine
//! shared by the recycle scheduler and the distributed cache rebuild.

mod hacker_news;

use async_trait::async_trait;
use futures::future::try_join_all;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Result;
use crate::models::{Snapshot, Story};

pub use hacker_news::HackerNewsClient;

/// Source of ranked story ids and the stories behind them.
#[async_trait]
pub trait StoryFetcher: Send + Sync {
    /// Returns the current best story ids in upstream order.
    async fn best_story_ids(&self, cancel: &CancellationToken) -> Result<Vec<u64>>;

    /// Returns a single story by id.
    async fn story(&self, id: u64, cancel: &CancellationToken) -> Result<Story>;
}

/// Fetches every best story and builds a ranked snapshot of at most `max_size`.
///
/// Items are fetched concurrently and installed all-or-nothing: a single failed
/// item fails the whole call. Returns `Ok(None)` when cancellation was observed
/// at any checkpoint, so callers can stop without touching their cache.
pub async fn fetch_ranked_snapshot(
    fetcher: &dyn StoryFetcher,
    max_size: usize,
    cancel: &CancellationToken,
) -> Result<Option<Snapshot>> {
    let ids = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(None),
        ids = fetcher.best_story_ids(cancel) => ids?,
    };

    if cancel.is_cancelled() {
        return Ok(None);
    }

    debug!("Fetching {} stories", ids.len());

    let stories = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(None),
        stories = try_join_all(ids.iter().map(|&id| fetcher.story(id, cancel))) => stories?,
    };

    if cancel.is_cancelled() {
        return Ok(None);
    }

    Ok(Some(Snapshot::ranked(stories, max_size)))
}
