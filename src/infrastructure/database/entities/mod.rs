//! Database entities module

pub mod traffic_entry;

pub use traffic_entry::Entity as TrafficEntry;
