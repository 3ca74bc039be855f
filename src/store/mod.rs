//! Store Module
//!
//! The expiring key-value store behind the distributed cache. The trait is the
//! boundary to whatever external cache is deployed; `MemoryStore` is the
//! in-process implementation used for single instances and tests.

mod entry;
mod memory;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use entry::StoreEntry;
pub use memory::MemoryStore;

/// Fixed key under which the ranked snapshot is stored.
pub const BEST_STORIES_KEY: &str = "best-stories";

/// Byte-oriented key-value store with server-side expiry.
#[async_trait]
pub trait ExpiringStore: Send + Sync {
    /// Returns the value, or None when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a value, replacing any previous one and resetting its TTL.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()>;
}
