//! API Handlers
//!
//! HTTP request handlers for the best stories endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio_util::sync::CancellationToken;

use crate::cache::StoryCache;
use crate::config::Config;
use crate::error::{Result, StoryError};
use crate::models::{BestStoriesRequest, HealthResponse, Story};
use crate::services::BestStoriesService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Retrieval service over the shared story cache
    pub service: BestStoriesService,
    /// Upper bound for the requested count
    pub cache_max_size: usize,
    /// Process shutdown signal; each request waits on a child of it
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(
        service: BestStoriesService,
        cache_max_size: usize,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            service,
            cache_max_size,
            shutdown,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wraps the shared cache in a retrieval service using the Config's retry settings.
    pub fn from_config(
        cache: Arc<dyn StoryCache>,
        config: &Config,
        shutdown: CancellationToken,
    ) -> Self {
        let service = BestStoriesService::from_config(cache, config);
        Self::new(service, config.cache_max_size, shutdown)
    }
}

/// Handler for GET /getbeststories/:count
///
/// Returns the `count` highest scored stories, best first.
pub async fn best_stories_handler(
    State(state): State<AppState>,
    Path(count): Path<i64>,
) -> Result<Json<Vec<Story>>> {
    let req = BestStoriesRequest { count };
    if let Some(error_msg) = req.validate(state.cache_max_size) {
        return Err(StoryError::InvalidRequest(error_msg));
    }

    // validate() guarantees 1..=cache_max_size
    let count = count as usize;
    let cancel = state.shutdown.child_token();
    let stories = state.service.get_best(count, &cancel).await?;

    Ok(Json(stories))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.service.cache().strategy().as_str()))
}
