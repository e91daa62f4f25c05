//! API Handlers

pub mod health;
pub mod traffic;

pub use health::*;
pub use traffic::*;
