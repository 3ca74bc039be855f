//! Mutex-guarded story cache

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::cache::{CacheStrategy, StoryCache};
use crate::error::Result;
use crate::models::Snapshot;

/// Story cache where one mutex serializes every read and write.
///
/// The lock is only held for a pointer clone or assignment, never across an
/// await point, so a blocking mutex is fine here.
#[derive(Debug, Default)]
pub struct LockedCache {
    slot: Mutex<Option<Snapshot>>,
}

impl LockedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the slot, recovering it if a holder panicked.
    ///
    /// The slot is only ever assigned whole, so a poisoned guard still holds
    /// either the previous snapshot or the new one.
    fn slot(&self) -> MutexGuard<'_, Option<Snapshot>> {
        self.slot.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            error!("Story cache mutex poisoned, recovering slot");
            self.slot.clear_poison();
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl StoryCache for LockedCache {
    async fn recycle(&self, snapshot: Snapshot) {
        *self.slot() = Some(snapshot);
    }

    async fn read(&self, _cancel: &CancellationToken) -> Result<Option<Snapshot>> {
        Ok(self.slot().clone())
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::Mutex
    }
}
