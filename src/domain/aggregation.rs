//! Range aggregation over (vehicle class, peak) groups
//!
//! The storage layer returns one pre-summed row per (vehicle_class, is_peak)
//! group; pricing is applied to the group sums, never row by row. Summing
//! first and pricing the aggregate is equivalent but avoids accumulating
//! float error across thousands of rows.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::pricing::PricingTable;

/// One pre-aggregated storage group: total entries for a
/// (vehicle class, peak flag) pair within the queried range.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassGroup {
    pub vehicle_class: String,
    pub is_peak: bool,
    pub entries: i64,
}

/// Roll-up of a time range: per-class counts and revenue plus grand totals.
///
/// Maps are ordered so identical inputs serialize to identical JSON.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct RangeSummary {
    /// Vehicles per class, peak and off-peak combined.
    pub vehicle_counts: BTreeMap<String, i64>,
    /// Sum of all per-class counts.
    pub total_vehicles: i64,
    /// Revenue per class; peak and off-peak contributions are priced
    /// separately, then folded into the same class bucket.
    pub revenue_per_class: BTreeMap<String, f64>,
    /// Sum of all per-class revenue.
    pub total_revenue: f64,
}

/// Fold pre-summed groups into a [`RangeSummary`].
pub fn summarize(groups: &[ClassGroup], pricing: &PricingTable) -> RangeSummary {
    let mut summary = RangeSummary::default();

    for group in groups {
        let price = pricing.unit_price(&group.vehicle_class, group.is_peak);
        let revenue = group.entries as f64 * price;

        *summary
            .vehicle_counts
            .entry(group.vehicle_class.clone())
            .or_insert(0) += group.entries;
        *summary
            .revenue_per_class
            .entry(group.vehicle_class.clone())
            .or_insert(0.0) += revenue;

        summary.total_vehicles += group.entries;
        summary.total_revenue += revenue;
    }

    summary
}
