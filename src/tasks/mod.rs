//! Background Tasks Module
//!
//! Long-running tasks spawned at startup and stopped through a shared
//! cancellation token.
//!
//! # Tasks
//! - Recycle scheduler: refreshes the story cache from upstream on a fixed period
//! - Store cleanup: sweeps expired entries out of the in-process TTL store

mod cleanup;
mod recycle;

pub use cleanup::spawn_cleanup_task;
pub use recycle::{spawn_recycle_task, CycleOutcome, RecycleScheduler};
