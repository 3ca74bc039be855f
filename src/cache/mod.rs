//! Cache Module
//!
//! Single-slot story caches. Every backend holds at most one ranked snapshot
//! and replaces it wholesale on recycle; they differ only in how concurrent
//! readers and the writer are kept apart.

mod async_mutex;
mod atomic;
mod distributed;
mod locked;
mod rwlock;


use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::models::Snapshot;

// Re-export public types
pub use async_mutex::AsyncMutexCache;
pub use atomic::AtomicCache;
pub use distributed::DistributedCache;
pub use locked::LockedCache;
pub use rwlock::RwLockCache;

// == Story Cache Trait ==
/// Holder of the current ranked snapshot.
///
/// `read` returns `Ok(None)` while the cache has never been populated; that is
/// a normal state, not an error. A read that starts after a recycle completed
/// sees that snapshot or a later one, never a partial one.
#[async_trait]
pub trait StoryCache: Send + Sync {
    /// Replaces the current snapshot. Failures are logged and leave the
    /// previous snapshot in place.
    async fn recycle(&self, snapshot: Snapshot);

    /// Returns the current snapshot, or None if none was ever installed.
    async fn read(&self, cancel: &CancellationToken) -> Result<Option<Snapshot>>;

    /// Which backend this is.
    fn strategy(&self) -> CacheStrategy;
}

// == Cache Strategy ==
/// Concurrency discipline used by the story cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStrategy {
    /// One mutex serializes every read and write
    Mutex,
    /// Concurrent readers, exclusive writer
    RwLock,
    /// Single-permit async mutex, safe across suspension points
    Semaphore,
    /// Lock-free pointer swap
    Atomic,
    /// External TTL store with admission-controlled rebuild
    Distributed,
}

impl CacheStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStrategy::Mutex => "mutex",
            CacheStrategy::RwLock => "rwlock",
            CacheStrategy::Semaphore => "semaphore",
            CacheStrategy::Atomic => "atomic",
            CacheStrategy::Distributed => "distributed",
        }
    }

    /// Builds an in-process backend, or None for `Distributed`, which needs a
    /// store and a fetcher (see [`DistributedCache::new`]).
    pub fn build_in_process(&self) -> Option<Arc<dyn StoryCache>> {
        match self {
            CacheStrategy::Mutex => Some(Arc::new(LockedCache::new())),
            CacheStrategy::RwLock => Some(Arc::new(RwLockCache::new())),
            CacheStrategy::Semaphore => Some(Arc::new(AsyncMutexCache::new())),
            CacheStrategy::Atomic => Some(Arc::new(AtomicCache::new())),
            CacheStrategy::Distributed => None,
        }
    }
}

impl fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mutex" | "locked" => Ok(CacheStrategy::Mutex),
            "rwlock" | "readerwriter" => Ok(CacheStrategy::RwLock),
            "semaphore" => Ok(CacheStrategy::Semaphore),
            "atomic" | "lockfree" => Ok(CacheStrategy::Atomic),
            "distributed" | "ttl" => Ok(CacheStrategy::Distributed),
            other => Err(format!("unknown cache strategy: {other}")),
        }
    }
}
