//! Core domain logic: pricing, interval presets, and the aggregation /
//! frame-distribution engine. Everything here is pure and synchronous.

pub mod aggregation;
pub mod intervals;
pub mod pricing;
pub mod series;

pub use aggregation::{summarize, ClassGroup, RangeSummary};
pub use intervals::{IntervalSpec, IntervalTable, DEFAULT_INTERVAL};
pub use pricing::PricingTable;
pub use series::{build_frames, collect_blocks, Frame, SeriesRow, TIMESTAMP_FORMAT};
