//! Hacker News API client

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::error::{Result, StoryError};
use crate::fetcher::StoryFetcher;
use crate::models::Story;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches best story ids and items over HTTP.
///
/// Paths are resolved relative to the configured base address, e.g.
/// `https://hacker-news.firebaseio.com/v0/`.
#[derive(Debug, Clone)]
pub struct HackerNewsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HackerNewsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoryError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let request = async {
            let response = self.http.get(&url).send().await?.error_for_status()?;
            Ok::<T, reqwest::Error>(response.json::<T>().await?)
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(StoryError::Cancelled),
            result = request => result.map_err(|e| {
                error!("GET {} failed: {}", url, e);
                StoryError::Fetch(e.to_string())
            }),
        }
    }
}

#[async_trait]
impl StoryFetcher for HackerNewsClient {
    async fn best_story_ids(&self, cancel: &CancellationToken) -> Result<Vec<u64>> {
        self.get_json("beststories.json", cancel).await
    }

    async fn story(&self, id: u64, cancel: &CancellationToken) -> Result<Story> {
        // Deleted items come back as a literal `null`
        self.get_json::<Option<Story>>(&format!("item/{id}.json"), cancel)
            .await?
            .ok_or(StoryError::NotFound(id))
    }
}
