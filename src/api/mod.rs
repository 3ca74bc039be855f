//! API Module
//!
//! HTTP handlers and routing for the best stories REST API.
//!
//! # Endpoints
//! - `GET /getbeststories/:count` - Top `count` stories by score
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
