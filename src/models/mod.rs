//! Data model and HTTP DTOs
//!
//! `Story` and `Snapshot` are the units exchanged between fetcher, caches and
//! services; the request/response types only exist for the HTTP layer.

pub mod requests;
pub mod responses;
pub mod snapshot;
pub mod story;

// Re-export commonly used types
pub use requests::BestStoriesRequest;
pub use responses::HealthResponse;
pub use snapshot::Snapshot;
pub use story::Story;
