//! Frame-distribution engine for playback series
//!
//! Takes the 10-minute storage blocks inside a requested span and spreads
//! them across a fixed number of animation frames. Each frame selects one
//! underlying block (`floor(i * blocks_per_frame)`) and scales that block's
//! per-location, per-class tallies by `blocks_per_frame`. This fixed
//! multiplier is a deliberate approximation: a frame receives a constant
//! multiple of one block's values regardless of its true temporal overlap
//! with that block. Running totals accumulate per location and class for the
//! lifetime of one call; nothing persists across requests.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use utoipa::ToSchema;

use super::intervals::IntervalSpec;
use super::pricing::PricingTable;

/// Stored timestamp / parameter format for every timestamp in the API.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One pre-summed storage row for the series query: entries for a
/// (block timestamp, location, vehicle class, peak flag) group.
#[derive(Debug, Clone)]
pub struct SeriesRow {
    pub datetime: String,
    pub detection_group: String,
    pub vehicle_class: String,
    pub is_peak: bool,
    pub entries: i64,
}

/// Vehicles and revenue for one (location, class) cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tally {
    pub vehicles: f64,
    pub revenue: f64,
}

impl Tally {
    fn add(&mut self, other: Tally) {
        self.vehicles += other.vehicles;
        self.revenue += other.revenue;
    }

    fn scaled(self, factor: f64) -> Tally {
        Tally {
            vehicles: self.vehicles * factor,
            revenue: self.revenue * factor,
        }
    }
}

/// Per-block tallies keyed by (detection group, vehicle class).
pub type BlockTallies = BTreeMap<(String, String), Tally>;

/// Vehicles and revenue, rounded for emission.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassStats {
    pub vehicles: f64,
    pub revenue: f64,
}

/// One location's stats within a frame: overall plus per-class breakdown.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LocationStats {
    pub vehicles: f64,
    pub revenue: f64,
    pub classes: BTreeMap<String, ClassStats>,
}

/// A location entry in a frame: this frame's scaled values and the running
/// totals across all frames so far.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LocationFrame {
    pub current: LocationStats,
    pub cumulative: LocationStats,
}

/// One element of the playback sequence. `locations` is empty when the
/// selected block index falls past the data actually present; the frame is
/// still emitted so the sequence always has the configured length.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Frame {
    pub frame: u32,
    pub timestamp: String,
    pub locations: BTreeMap<String, LocationFrame>,
}

/// Group pre-summed series rows into ordered blocks.
///
/// Blocks are the distinct timestamps present in the range, ascending
/// (string order equals chronological order for the stored format). Revenue
/// is priced per peak-group before peak and off-peak merge into the same
/// (location, class) cell.
pub fn collect_blocks(rows: &[SeriesRow], pricing: &PricingTable) -> Vec<BlockTallies> {
    let mut blocks: BTreeMap<String, BlockTallies> = BTreeMap::new();

    for row in rows {
        let price = pricing.unit_price(&row.vehicle_class, row.is_peak);
        let cell = blocks
            .entry(row.datetime.clone())
            .or_default()
            .entry((row.detection_group.clone(), row.vehicle_class.clone()))
            .or_default();
        cell.add(Tally {
            vehicles: row.entries as f64,
            revenue: row.entries as f64 * price,
        });
    }

    blocks.into_values().collect()
}

/// Running per-location totals, kept unrounded so emission rounding can
/// never make a cumulative value step backwards.
#[derive(Debug, Default)]
struct LocationCumulative {
    total: Tally,
    classes: BTreeMap<String, Tally>,
}

/// Distribute `blocks` across the preset's frame count, starting at `start`.
pub fn build_frames(
    start: NaiveDateTime,
    spec: IntervalSpec,
    blocks: &[BlockTallies],
) -> Vec<Frame> {
    let blocks_per_frame = spec.blocks_per_frame();
    let total_seconds = spec.duration().num_seconds();
    let mut cumulative: BTreeMap<String, LocationCumulative> = BTreeMap::new();
    let mut frames = Vec::with_capacity(spec.frames as usize);

    for i in 0..spec.frames {
        let offset = Duration::seconds(i as i64 * total_seconds / spec.frames as i64);
        let timestamp = (start + offset).format(TIMESTAMP_FORMAT).to_string();

        let block_index = (i as f64 * blocks_per_frame).floor() as usize;
        let mut locations = BTreeMap::new();

        if let Some(block) = blocks.get(block_index) {
            // Scale this block's cells and fold them into per-location
            // current and cumulative views.
            let mut current: BTreeMap<String, LocationCumulative> = BTreeMap::new();
            for ((location, class), tally) in block {
                let scaled = tally.scaled(blocks_per_frame);

                let cur = current.entry(location.clone()).or_default();
                cur.total.add(scaled);
                cur.classes.entry(class.clone()).or_default().add(scaled);

                let cum = cumulative.entry(location.clone()).or_default();
                cum.total.add(scaled);
                cum.classes.entry(class.clone()).or_default().add(scaled);
            }

            for (location, cur) in current {
                let cum = &cumulative[&location];
                locations.insert(
                    location,
                    LocationFrame {
                        current: emit_stats(&cur),
                        cumulative: emit_stats(cum),
                    },
                );
            }
        }

        frames.push(Frame {
            frame: i,
            timestamp,
            locations,
        });
    }

    frames
}

fn emit_stats(acc: &LocationCumulative) -> LocationStats {
    LocationStats {
        vehicles: round2(acc.total.vehicles),
        revenue: round2(acc.total.revenue),
        classes: acc
            .classes
            .iter()
            .map(|(class, tally)| {
                (
                    class.clone(),
                    ClassStats {
                        vehicles: round2(tally.vehicles),
                        revenue: round2(tally.revenue),
                    },
                )
            })
            .collect(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intervals::IntervalTable;

    fn parse(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    fn row(datetime: &str, group: &str, class: &str, peak: bool, entries: i64) -> SeriesRow {
        SeriesRow {
            datetime: datetime.to_string(),
            detection_group: group.to_string(),
            vehicle_class: class.to_string(),
            is_peak: peak,
            entries,
        }
    }

    #[test]
    fn empty_range_still_emits_all_frames() {
        let spec = IntervalTable::standard().get("1hr").unwrap();
        let frames = build_frames(parse("2025-01-05 08:00:00"), spec, &[]);

        assert_eq!(frames.len(), 12);
        assert!(frames.iter().all(|f| f.locations.is_empty()));
        assert_eq!(frames[0].timestamp, "2025-01-05 08:00:00");
        assert_eq!(frames[1].timestamp, "2025-01-05 08:05:00");
        assert_eq!(frames[11].timestamp, "2025-01-05 08:55:00");
    }

    #[test]
    fn one_hour_halves_each_block_across_two_frames() {
        // 1hr: 6 blocks over 12 frames, so blocks_per_frame = 0.5 and frames
        // 0 and 1 both select block 0 at half weight.
        let pricing = PricingTable::crz_default();
        let rows = vec![row("2025-01-05 08:00:00", "Brooklyn Bridge", "Car", true, 10)];
        let blocks = collect_blocks(&rows, &pricing);
        let spec = IntervalTable::standard().get("1hr").unwrap();

        let frames = build_frames(parse("2025-01-05 08:00:00"), spec, &blocks);

        let f0 = &frames[0].locations["Brooklyn Bridge"];
        assert_eq!(f0.current.vehicles, 5.0);
        assert_eq!(f0.current.revenue, 45.0);
        assert_eq!(f0.cumulative.vehicles, 5.0);

        let f1 = &frames[1].locations["Brooklyn Bridge"];
        assert_eq!(f1.current.vehicles, 5.0);
        assert_eq!(f1.cumulative.vehicles, 10.0);
        assert_eq!(f1.cumulative.revenue, 90.0);

        // Only one block exists; frames 2.. select indexes past the data.
        assert!(frames[2].locations.is_empty());
        assert_eq!(frames.len(), 12);
    }

    #[test]
    fn block_selection_uses_floor_of_fractional_stride() {
        // 1day: 144 blocks over 20 frames = 7.2 blocks per frame.
        let spec = IntervalTable::standard().get("1day").unwrap();
        let stride = spec.blocks_per_frame();
        let picks: Vec<usize> = (0..spec.frames)
            .map(|i| (i as f64 * stride).floor() as usize)
            .collect();
        assert_eq!(&picks[..5], &[0, 7, 14, 21, 28]);
        assert_eq!(picks[19], 136);
    }

    #[test]
    fn cumulative_is_monotonic_per_location_and_class() {
        let pricing = PricingTable::crz_default();
        let rows = vec![
            row("2025-01-05 08:00:00", "Holland Tunnel", "Car", true, 10),
            row("2025-01-05 08:00:00", "Holland Tunnel", "Taxi", false, 3),
            row("2025-01-05 08:10:00", "Holland Tunnel", "Car", false, 6),
            row("2025-01-05 08:20:00", "Lincoln Tunnel", "Buses", true, 2),
            row("2025-01-05 08:30:00", "Holland Tunnel", "Car", true, 1),
        ];
        let blocks = collect_blocks(&rows, &pricing);
        let spec = IntervalTable::standard().get("1hr").unwrap();
        let frames = build_frames(parse("2025-01-05 08:00:00"), spec, &blocks);

        let mut last: BTreeMap<(String, String), (f64, f64)> = BTreeMap::new();
        for frame in &frames {
            for (location, entry) in &frame.locations {
                for (class, stats) in &entry.cumulative.classes {
                    let key = (location.clone(), class.clone());
                    let (prev_v, prev_r) = last.get(&key).copied().unwrap_or((0.0, 0.0));
                    assert!(stats.vehicles >= prev_v, "{key:?} vehicles decreased");
                    assert!(stats.revenue >= prev_r, "{key:?} revenue decreased");
                    last.insert(key, (stats.vehicles, stats.revenue));
                }
            }
        }
    }

    #[test]
    fn duplicate_rows_in_one_block_sum_into_one_cell() {
        let pricing = PricingTable::crz_default();
        let rows = vec![
            row("2025-01-05 08:00:00", "Holland Tunnel", "Car", true, 4),
            row("2025-01-05 08:00:00", "Holland Tunnel", "Car", false, 6),
        ];
        let blocks = collect_blocks(&rows, &pricing);

        assert_eq!(blocks.len(), 1);
        let cell = &blocks[0][&("Holland Tunnel".to_string(), "Car".to_string())];
        assert_eq!(cell.vehicles, 10.0);
        // 4 * 9.00 + 6 * 2.25
        assert!((cell.revenue - 49.5).abs() < 1e-9);
    }

    #[test]
    fn values_are_rounded_to_two_decimals() {
        // 1day scaling: 7.2 * 1 vehicle, revenue 7.2 * 1.05 = 7.56.
        let pricing = PricingTable::crz_default();
        let rows = vec![row(
            "2025-01-05 00:00:00",
            "Queensboro Bridge",
            "Motorcycles",
            false,
            1,
        )];
        let blocks = collect_blocks(&rows, &pricing);
        let spec = IntervalTable::standard().get("1day").unwrap();
        let frames = build_frames(parse("2025-01-05 00:00:00"), spec, &blocks);

        let entry = &frames[0].locations["Queensboro Bridge"];
        assert_eq!(entry.current.vehicles, 7.2);
        assert_eq!(entry.current.revenue, 7.56);
    }
}
