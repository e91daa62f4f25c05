//! REST API module
//!
//! Read-only HTTP endpoints over the traffic table: raw listing, filtered
//! aggregation, and the synthetic playback series.

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{create_api_router, AppState};
