//! Universe clock.
//!
//! Tracks the configured tick length and how much signed time has passed.
//! Unlike a wall clock it runs backwards too: a negative tick subtracts.

use serde::{Deserialize, Serialize};

/// Clock of one universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickClock {
    /// Default seconds per tick.
    tick_length: f64,
    /// Signed sum of completed non-zero ticks.
    elapsed: f64,
    /// Number of completed non-zero ticks.
    tick_count: u64,
}

impl TickClock {
    /// Create a clock at time zero.
    ///
    /// Any value is accepted, including zero and negative lengths.
    #[must_use]
    pub const fn new(tick_length: f64) -> Self {
        Self {
            tick_length,
            elapsed: 0.0,
            tick_count: 0,
        }
    }

    /// Default seconds per tick.
    #[must_use]
    pub const fn tick_length(&self) -> f64 {
        self.tick_length
    }

    /// Change the default tick length.
    pub fn set_tick_length(&mut self, tick_length: f64) {
        self.tick_length = tick_length;
    }

    /// Resolve the length of a tick: the explicit `dt` if given, else the
    /// configured length.
    #[must_use]
    pub fn resolve(&self, dt: Option<f64>) -> f64 {
        dt.unwrap_or(self.tick_length)
    }

    /// Record a completed tick.
    ///
    /// Zero-length ticks do not count: no time passed.
    #[allow(clippy::float_cmp)]
    pub fn advance(&mut self, dt: f64) {
        if dt == 0.0 {
            return;
        }
        self.elapsed += dt;
        self.tick_count += 1;
    }

    /// Signed seconds elapsed.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Completed non-zero ticks.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}
