//! Orchestration services - the layer between transport and persistence.

mod post_service;

pub use post_service::{DEFAULT_RECENT_COUNT, MAX_RECENT_COUNT, PostService};
