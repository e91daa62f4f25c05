//! Congestion-pricing toll table

use std::collections::HashMap;

/// Toll pricing table keyed by (vehicle class, peak flag).
///
/// Built once at startup and shared read-only across requests. A lookup
/// for a class that is not in the table yields 0.0 rather than an error:
/// unknown or unpriced classes still count vehicles but earn no revenue.
#[derive(Debug, Clone)]
pub struct PricingTable {
    prices: HashMap<(String, bool), f64>,
}

impl PricingTable {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
        }
    }

    /// The NYC Congestion Relief Zone tariff schedule.
    pub fn crz_default() -> Self {
        let mut table = Self::new();
        table.set("Car", false, 2.25);
        table.set("Car", true, 9.0);
        table.set("Buses", false, 3.6);
        table.set("Buses", true, 14.4);
        table.set("Motorcycles", false, 1.05);
        table.set("Motorcycles", true, 4.5);
        table.set("Taxi", false, 0.75);
        table.set("Taxi", true, 0.75);
        table.set("Single Unit Trucks", false, 3.6);
        table.set("Single Unit Trucks", true, 14.4);
        table.set("Multi Unit Trucks", false, 5.4);
        table.set("Multi Unit Trucks", true, 21.6);
        table
    }

    pub fn set(&mut self, vehicle_class: &str, is_peak: bool, price: f64) {
        self.prices
            .insert((vehicle_class.to_string(), is_peak), price);
    }

    /// Unit toll for one vehicle of the given class under the given tariff.
    /// Missing entries price at 0.0.
    pub fn unit_price(&self, vehicle_class: &str, is_peak: bool) -> f64 {
        self.prices
            .get(&(vehicle_class.to_string(), is_peak))
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::crz_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_and_off_peak_priced_separately() {
        let table = PricingTable::crz_default();
        assert_eq!(table.unit_price("Car", false), 2.25);
        assert_eq!(table.unit_price("Car", true), 9.0);
    }

    #[test]
    fn unknown_class_prices_at_zero() {
        let table = PricingTable::crz_default();
        assert_eq!(table.unit_price("Bicycles", true), 0.0);
        assert_eq!(table.unit_price("Bicycles", false), 0.0);
    }
}
