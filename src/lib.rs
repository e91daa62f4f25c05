//! # CRZ Traffic Analytics Service
//!
//! Read-only HTTP service over a SQLite table of congestion-pricing traffic
//! counts. A one-time CSV ingest populates the table at first startup; after
//! that every endpoint is a pure read.
//!
//! ## Architecture
//!
//! - **domain**: pricing table, interval presets, and the pure aggregation /
//!   frame-distribution engine
//! - **infrastructure**: SeaORM database (entity, migrations, repository)
//!   and the startup CSV loader
//! - **api**: axum router, handlers and DTOs with Swagger documentation
//! - **shared**: error types common to all layers

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use api::{create_api_router, AppState};
