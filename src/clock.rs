//! Clock Supervisor: uptime counters driven by a 1 kHz tick.
//!
//! The tick handler ([`TickCounter::on_tick`]) runs in timer context and
//! does nothing but increment.  Seconds live in a single `AtomicU32`, so
//! the main line can never observe a half-updated value.
//!
//! ```text
//!   hw_timer (1 kHz) ──on_tick──▶ ms_in_sec ──(1000)──▶ secs ──▶ TickClock::now_secs
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

/// Ticks per second of the driving timer.
pub const TICKS_PER_SEC: u32 = 1000;

/// The counters incremented by the periodic tick.
pub struct TickCounter {
    /// Total ticks since boot (wraps after ~49 days).
    millis: AtomicU32,
    /// Ticks since the last whole second.  Only touched by `on_tick`.
    ms_in_sec: AtomicU32,
    /// Whole seconds since boot.
    secs: AtomicU32,
}

/// The firmware-wide tick counter fed by [`crate::drivers::hw_timer`].
pub static SYSTEM_TICKS: TickCounter = TickCounter::new();

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            millis: AtomicU32::new(0),
            ms_in_sec: AtomicU32::new(0),
            secs: AtomicU32::new(0),
        }
    }

    /// Advance by one millisecond.  Timer-context safe: no locks, no logging.
    pub fn on_tick(&self) {
        self.millis.fetch_add(1, Ordering::Relaxed);
        let ms = self.ms_in_sec.load(Ordering::Relaxed) + 1;
        if ms >= TICKS_PER_SEC {
            self.ms_in_sec.store(0, Ordering::Relaxed);
            self.secs.fetch_add(1, Ordering::Release);
        } else {
            self.ms_in_sec.store(ms, Ordering::Relaxed);
        }
    }

    /// Whole seconds since boot.
    pub fn secs(&self) -> u32 {
        self.secs.load(Ordering::Acquire)
    }

    /// Milliseconds since boot, wrapping.
    pub fn millis(&self) -> u32 {
        self.millis.load(Ordering::Relaxed)
    }
}
