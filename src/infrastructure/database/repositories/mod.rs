//! Database repository implementations

pub mod traffic_repository;

pub use traffic_repository::{RangeFilter, TrafficRepository};
