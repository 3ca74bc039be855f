//! Store Entry Module
//!
//! Defines the structure for individual store entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Store Entry ==
/// Represents a single stored value with its expiry metadata.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// When the entry stops being visible, None = no expiration
    pub expires_at: Option<Instant>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry with optional TTL.
    pub fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiry instant.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires| Instant::now() >= expires)
            .unwrap_or(false)
    }
}
