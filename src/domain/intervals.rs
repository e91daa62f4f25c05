//! Playback interval presets
//!
//! Each preset maps an interval name to the number of 10-minute storage
//! blocks it spans and the number of animation frames the series endpoint
//! must emit for it. The table is a process-wide constant.

use std::collections::BTreeMap;

use chrono::Duration;

/// Width of one storage block. The finest temporal granularity available.
pub const BLOCK_MINUTES: i64 = 10;

/// One playback preset: how many 10-minute blocks the interval covers and
/// how many frames it is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSpec {
    pub blocks: u32,
    pub frames: u32,
}

impl IntervalSpec {
    /// Total wall-clock span of the interval.
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.blocks as i64 * BLOCK_MINUTES)
    }

    /// Blocks apportioned to each frame. Rational, not necessarily
    /// integral (1day: 144 blocks over 20 frames = 7.2).
    pub fn blocks_per_frame(&self) -> f64 {
        self.blocks as f64 / self.frames as f64
    }
}

/// Interval name used when the caller omits the parameter.
pub const DEFAULT_INTERVAL: &str = "1hr";

/// Lookup table from interval name to its preset.
#[derive(Debug, Clone)]
pub struct IntervalTable {
    specs: BTreeMap<&'static str, IntervalSpec>,
}

impl IntervalTable {
    pub fn standard() -> Self {
        let mut specs = BTreeMap::new();
        let mut put = |name, blocks, frames| {
            specs.insert(name, IntervalSpec { blocks, frames });
        };
        put("10min", 1, 3);
        put("30min", 3, 6);
        put("1hr", 6, 12);
        put("3hr", 18, 18);
        put("6hr", 36, 18);
        put("1day", 144, 20);
        put("1week", 1008, 30);
        put("2week", 2016, 60);
        put("1month", 4320, 120);
        put("3month", 12960, 180);
        Self { specs }
    }

    pub fn get(&self, name: &str) -> Option<IntervalSpec> {
        self.specs.get(name).copied()
    }

    /// Names of all known intervals, for error messages.
    pub fn names(&self) -> Vec<&'static str> {
        self.specs.keys().copied().collect()
    }
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self::standard()
    }
}
