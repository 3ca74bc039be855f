//! Services Module
//!
//! Consumer-facing operations invoked by the HTTP layer.

mod best_stories;

pub use best_stories::BestStoriesService;
