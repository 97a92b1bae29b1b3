//! Clock adapter over the firmware tick counter.
//!
//! Implements [`ClockPort`] by reading a [`TickCounter`], normally
//! [`SYSTEM_TICKS`] fed by [`hw_timer`](crate::drivers::hw_timer).  Reads
//! are a single atomic load, safe while the tick callback runs.

use crate::app::ports::ClockPort;
use crate::clock::{SYSTEM_TICKS, TickCounter};

#[derive(Clone, Copy)]
pub struct TickClock {
    ticks: &'static TickCounter,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock {
    /// Reads the firmware-wide tick counter.
    pub fn new() -> Self {
        Self::with_counter(&SYSTEM_TICKS)
    }

    pub fn with_counter(ticks: &'static TickCounter) -> Self {
        Self { ticks }
    }

    /// Milliseconds since boot, wrapping.
    pub fn uptime_ms(&self) -> u32 {
        self.ticks.millis()
    }
}

impl ClockPort for TickClock {
    fn now_secs(&self) -> u32 {
        self.ticks.secs()
    }
}
