//! Ranked, immutable story snapshot
//!
//! A snapshot is built once, ranked by score, and then only ever shared. Caches
//! replace snapshots wholesale; nothing mutates one in place.

use std::ops::Deref;
use std::sync::Arc;

use crate::error::Result;
use crate::models::Story;

// == Snapshot ==
/// Score-ordered sequence of stories behind a shared pointer.
///
/// Cloning is a reference count bump, so readers can hold a snapshot for as
/// long as they like while the cache moves on to a newer one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    stories: Arc<Vec<Story>>,
}

impl Snapshot {
    // == Constructors ==
    /// Ranks stories by score descending and keeps at most `max_size`.
    ///
    /// The sort is stable: equal scores keep the order they were fetched in.
    pub fn ranked(mut stories: Vec<Story>, max_size: usize) -> Self {
        stories.sort_by(|a, b| b.score.cmp(&a.score));
        stories.truncate(max_size);
        Self::from_ranked(stories)
    }

    /// Wraps stories that are already in rank order.
    pub fn from_ranked(stories: Vec<Story>) -> Self {
        Self {
            stories: Arc::new(stories),
        }
    }

    // == Slicing ==
    /// Returns owned copies of the first `count` stories.
    pub fn top(&self, count: usize) -> Vec<Story> {
        self.stories.iter().take(count).cloned().collect()
    }

    /// Returns true when both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.stories, &other.stories)
    }

    // == JSON Encoding ==
    /// Encodes the snapshot as a JSON array of stories.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self.stories.as_slice())?)
    }

    /// Decodes a JSON array written by [`Snapshot::to_json`], keeping its order.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let stories: Vec<Story> = serde_json::from_slice(bytes)?;
        Ok(Self::from_ranked(stories))
    }
}

impl Deref for Snapshot {
    type Target = [Story];

    fn deref(&self) -> &[Story] {
        &self.stories
    }
}

impl From<Arc<Vec<Story>>> for Snapshot {
    fn from(stories: Arc<Vec<Story>>) -> Self {
        Self { stories }
    }
}

impl From<Snapshot> for Arc<Vec<Story>> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.stories
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoryError;

    fn ids(snapshot: &Snapshot) -> Vec<u64> {
        snapshot.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_ranked_orders_and_truncates() {
        let stories = vec![
            Story::new(1, 10),
            Story::new(2, 50),
            Story::new(3, 30),
            Story::new(4, 20),
            Story::new(5, 40),
        ];

        let snapshot = Snapshot::ranked(stories, 3);
        assert_eq!(ids(&snapshot), vec![2, 5, 3]);
    }

    #[test]
    fn test_ranked_keeps_fetch_order_on_ties() {
        let stories = vec![Story::new(9, 5), Story::new(4, 7), Story::new(1, 5)];

        let snapshot = Snapshot::ranked(stories, 10);
        assert_eq!(ids(&snapshot), vec![4, 9, 1]);
    }

    #[test]
    fn test_top_caps_at_length() {
        let snapshot = Snapshot::ranked(vec![Story::new(1, 1), Story::new(2, 2)], 10);
        assert_eq!(snapshot.top(1).len(), 1);
        assert_eq!(snapshot.top(5).len(), 2);
    }

    #[test]
    fn test_json_preserves_order() {
        let snapshot = Snapshot::from_ranked(vec![Story::new(3, 1), Story::new(1, 9)]);
        let bytes = snapshot.to_json().unwrap();
        let decoded = Snapshot::from_json(&bytes).unwrap();
        assert_eq!(ids(&decoded), vec![3, 1]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let result = Snapshot::from_json(b"{not json");
        assert!(matches!(result, Err(StoryError::Serialization(_))));
    }

    #[test]
    fn test_clone_shares_allocation() {
        let snapshot = Snapshot::from_ranked(vec![Story::new(1, 1)]);
        let clone = snapshot.clone();
        assert!(snapshot.ptr_eq(&clone));
        assert!(!snapshot.ptr_eq(&Snapshot::from_ranked(vec![Story::new(1, 1)])));
    }
}
