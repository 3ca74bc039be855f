//! Story item as published by the upstream index

use serde::{Deserialize, Serialize};

/// A single ranked item.
///
/// Field names on the wire match the upstream item JSON, so the same type is
/// used to decode upstream responses, to persist snapshots and to answer
/// HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Upstream identifier
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Link target, empty for text posts
    #[serde(default)]
    pub url: String,
    /// Author handle
    #[serde(rename = "by", default)]
    pub author: String,
    /// Creation time in upstream epoch seconds
    #[serde(default)]
    pub time: i64,
    /// Ranking key
    #[serde(default)]
    pub score: i64,
    /// Comment count
    #[serde(default)]
    pub descendants: i64,
}

impl Story {
    /// Creates a story with the given id and score and empty metadata.
    pub fn new(id: u64, score: i64) -> Self {
        Self {
            id,
            title: String::new(),
            url: String::new(),
            author: String::new(),
            time: 0,
            score,
            descendants: 0,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
