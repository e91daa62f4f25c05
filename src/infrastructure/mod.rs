//! Infrastructure layer - external concerns

pub mod database;
pub mod ingest;

pub use database::{init_database, DatabaseConfig};
