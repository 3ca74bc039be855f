//! Best Stories - top-N story service over a refreshable single-slot cache
//!
//! A background scheduler periodically replaces a ranked snapshot of the
//! upstream best stories; request handlers read bounded prefixes of it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod services;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStrategy, StoryCache};
pub use config::Config;
pub use error::{Result, StoryError};
pub use services::BestStoriesService;
pub use tasks::{spawn_cleanup_task, spawn_recycle_task, RecycleScheduler};
