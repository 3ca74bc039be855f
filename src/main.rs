//! Best Stories - top-N story service over a refreshable single-slot cache
//!
//! Serves the highest scored Hacker News stories from an in-memory snapshot
//! that a background task recycles on a fixed period.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use best_stories::api::create_router;
use best_stories::cache::{CacheStrategy, DistributedCache, StoryCache};
use best_stories::fetcher::{HackerNewsClient, StoryFetcher};
use best_stories::store::MemoryStore;
use best_stories::{spawn_cleanup_task, spawn_recycle_task, AppState, Config, RecycleScheduler};

/// Main entry point for the best stories server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the upstream client and the configured story cache
/// 4. Start the background task feeding that cache
/// 5. Create Axum router and serve on the configured port
/// 6. On SIGINT/SIGTERM cancel background work and wait for it
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "best_stories=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Best Stories Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: strategy={}, max_size={}, port={}",
        config.cache_strategy, config.cache_max_size, config.server_port
    );
    info!(
        "Cache timing: recycle_delay={}ms, retry_delay={}ms, max_retries={}",
        config.cache_recycle_delay_ms, config.cache_retry_delay_ms, config.cache_max_retry_attempts
    );

    let fetcher: Arc<dyn StoryFetcher> = Arc::new(
        HackerNewsClient::new(config.hacker_news_api.clone())
            .context("failed to build upstream client")?,
    );

    let shutdown = CancellationToken::new();
    let mut background: Vec<JoinHandle<()>> = Vec::new();

    let cache: Arc<dyn StoryCache> = match config.cache_strategy.build_in_process() {
        Some(cache) => {
            let scheduler = RecycleScheduler::from_config(cache.clone(), fetcher, &config);
            background.push(spawn_recycle_task(scheduler, shutdown.clone()));
            info!("Recycle scheduler started");
            cache
        }
        None => {
            debug_assert_eq!(config.cache_strategy, CacheStrategy::Distributed);
            let store = Arc::new(MemoryStore::new());
            background.push(spawn_cleanup_task(
                store.clone(),
                config.cleanup_interval,
                shutdown.clone(),
            ));
            info!(
                "Distributed cache with {}s expiry, rebuilding on demand",
                config.cache_expiry_secs
            );
            Arc::new(DistributedCache::new(
                store,
                fetcher,
                config.cache_expiry(),
                config.cache_max_size,
            ))
        }
    };

    let state = AppState::from_config(cache, &config, shutdown.clone());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await
        .context("server error")?;

    // Covers the case where the server stopped on its own
    shutdown.cancel();
    for handle in background {
        if let Err(e) = handle.await {
            warn!("Background task ended abnormally: {}", e);
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then cancels `shutdown`.
///
/// Cancelling stops the background tasks and makes requests still waiting
/// on a cold cache return an empty list.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    shutdown.cancel();
}
