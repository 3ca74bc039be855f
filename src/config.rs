//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheStrategy;

/// Default upstream base address.
pub const DEFAULT_HACKER_NEWS_API: &str = "https://hacker-news.firebaseio.com/v0/";

/// Service configuration parameters.
///
/// Loaded once at startup and shared read-only afterwards. All values can be
/// configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the upstream API
    pub hacker_news_api: String,
    /// Which cache backend to build
    pub cache_strategy: CacheStrategy,
    /// Upper bound on snapshot length and on per-request count
    pub cache_max_size: usize,
    /// Delay between scheduler cycles in milliseconds
    pub cache_recycle_delay_ms: u64,
    /// Delay between reads of a cold cache in milliseconds
    pub cache_retry_delay_ms: u64,
    /// Retries allowed after the initial read of a cold cache
    pub cache_max_retry_attempts: u32,
    /// TTL in seconds for the distributed cache entry
    pub cache_expiry_secs: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Store expiry sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HACKER_NEWS_API` - Upstream base address
    /// - `CACHE_STRATEGY` - `mutex`, `rwlock`, `semaphore`, `atomic` or `distributed`
    ///   (default: rwlock)
    /// - `CACHE_MAX_SIZE` - Maximum stories kept (default: 200)
    /// - `CACHE_RECYCLE_DELAY_MS` - Scheduler period (default: 60000)
    /// - `CACHE_RETRY_DELAY_MS` - Cold cache retry delay (default: 1000)
    /// - `CACHE_MAX_RETRY_ATTEMPTS` - Cold cache retries (default: 5)
    /// - `CACHE_EXPIRY_SECS` - Distributed cache TTL (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Store sweep frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            hacker_news_api: env::var("HACKER_NEWS_API").unwrap_or(defaults.hacker_news_api),
            cache_strategy: parse_var("CACHE_STRATEGY").unwrap_or(defaults.cache_strategy),
            cache_max_size: parse_var("CACHE_MAX_SIZE").unwrap_or(defaults.cache_max_size),
            cache_recycle_delay_ms: parse_var("CACHE_RECYCLE_DELAY_MS")
                .unwrap_or(defaults.cache_recycle_delay_ms),
            cache_retry_delay_ms: parse_var("CACHE_RETRY_DELAY_MS")
                .unwrap_or(defaults.cache_retry_delay_ms),
            cache_max_retry_attempts: parse_var("CACHE_MAX_RETRY_ATTEMPTS")
                .unwrap_or(defaults.cache_max_retry_attempts),
            cache_expiry_secs: parse_var("CACHE_EXPIRY_SECS").unwrap_or(defaults.cache_expiry_secs),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Scheduler period.
    pub fn recycle_delay(&self) -> Duration {
        Duration::from_millis(self.cache_recycle_delay_ms)
    }

    /// Wait between reads of a cold cache.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.cache_retry_delay_ms)
    }

    /// TTL applied to the distributed cache entry.
    pub fn cache_expiry(&self) -> Duration {
        Duration::from_secs(self.cache_expiry_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hacker_news_api: DEFAULT_HACKER_NEWS_API.to_string(),
            cache_strategy: CacheStrategy::RwLock,
            cache_max_size: 200,
            cache_recycle_delay_ms: 60_000,
            cache_retry_delay_ms: 1_000,
            cache_max_retry_attempts: 5,
            cache_expiry_secs: 60,
            server_port: 3000,
            cleanup_interval: 30,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.hacker_news_api, DEFAULT_HACKER_NEWS_API);
        assert_eq!(config.cache_strategy, CacheStrategy::RwLock);
        assert_eq!(config.cache_max_size, 200);
        assert_eq!(config.cache_max_retry_attempts, 5);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_durations() {
        let config = Config {
            cache_recycle_delay_ms: 1500,
            cache_retry_delay_ms: 20,
            cache_expiry_secs: 7,
            ..Config::default()
        };
        assert_eq!(config.recycle_delay(), Duration::from_millis(1500));
        assert_eq!(config.retry_delay(), Duration::from_millis(20));
        assert_eq!(config.cache_expiry(), Duration::from_secs(7));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        for name in [
            "HACKER_NEWS_API",
            "CACHE_STRATEGY",
            "CACHE_MAX_SIZE",
            "CACHE_RECYCLE_DELAY_MS",
            "CACHE_RETRY_DELAY_MS",
            "CACHE_MAX_RETRY_ATTEMPTS",
            "CACHE_EXPIRY_SECS",
            "SERVER_PORT",
            "CLEANUP_INTERVAL",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();
        assert_eq!(config.cache_strategy, CacheStrategy::RwLock);
        assert_eq!(config.cache_max_size, 200);
        assert_eq!(config.cache_recycle_delay_ms, 60_000);
        assert_eq!(config.cache_retry_delay_ms, 1_000);
        assert_eq!(config.cache_expiry_secs, 60);
        assert_eq!(config.cleanup_interval, 30);
    }
}
