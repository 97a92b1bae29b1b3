//! HC-SR04-style ultrasonic ranger.
//!
//! ```text
//!  TRIG ─┐▔▔▔▔▔┌──────────────────────────────
//!        └─150µs┘
//!  ECHO ───────────────┌▔▔▔▔▔▔ width ▔▔▔▔▔▔┐──
//!                      rise                fall
//! ```
//!
//! No rise within [`ECHO_RISE_TIMEOUT_US`] reads as
//! [`DistanceReading::Error`].  An echo still high after
//! [`MAX_ECHO_US`] is out of range and reads as
//! [`DistanceReading::NoObstacle`].  Otherwise `cm = width / 58`.
//!
//! Generic over `embedded-hal` 1.0 pins and delay so the timing logic runs
//! on the host against scripted pins; the microsecond timebase is injected
//! as a plain `fn`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::app::ports::DistanceReading;

pub const TRIGGER_PULSE_US: u32 = 150;
pub const ECHO_RISE_TIMEOUT_US: u64 = 60_000;
/// Longest echo still counted as a reading (about 5 m).
pub const MAX_ECHO_US: u32 = 30_000;
/// Round-trip microseconds per centimetre.
pub const US_PER_CM: u32 = 58;

/// Map a measured echo to a reading.  `None` means the echo never rose.
pub fn classify_echo(width_us: Option<u32>) -> DistanceReading {
    match width_us {
        None => DistanceReading::Error,
        Some(w) if w > MAX_ECHO_US => DistanceReading::NoObstacle,
        Some(w) => DistanceReading::Centimetres((w / US_PER_CM) as u16),
    }
}

pub struct Ultrasonic<T, E, D> {
    trig: T,
    echo: E,
    delay: D,
    now_us: fn() -> u64,
}

impl<T: OutputPin, E: InputPin, D: DelayNs> Ultrasonic<T, E, D> {
    pub fn new(trig: T, echo: E, delay: D, now_us: fn() -> u64) -> Self {
        Self {
            trig,
            echo,
            delay,
            now_us,
        }
    }

    /// Run one trigger/echo cycle.  Blocks for at most
    /// `ECHO_RISE_TIMEOUT_US + MAX_ECHO_US`.
    pub fn measure(&mut self) -> DistanceReading {
        let reading = classify_echo(self.echo_width());
        debug!("Ultrasonic: {:?}", reading);
        reading
    }

    fn echo_width(&mut self) -> Option<u32> {
        if self.trig.set_high().is_err() {
            return None;
        }
        self.delay.delay_us(TRIGGER_PULSE_US);
        if self.trig.set_low().is_err() {
            return None;
        }

        let wait_start = (self.now_us)();
        loop {
            if self.echo.is_high().ok()? {
                break;
            }
            if (self.now_us)().saturating_sub(wait_start) >= ECHO_RISE_TIMEOUT_US {
                return None;
            }
        }

        let rise = (self.now_us)();
        loop {
            let width = (self.now_us)().saturating_sub(rise);
            if width > u64::from(MAX_ECHO_US) {
                return Some(width.min(u64::from(u32::MAX)) as u32);
            }
            if self.echo.is_low().ok()? {
                return Some(width as u32);
            }
        }
    }
}
