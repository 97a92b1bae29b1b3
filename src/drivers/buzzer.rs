//! Active buzzer driver: fixed on/off patterns on one GPIO.
//!
//! | Pattern   | Timing (ms)                        |
//! |-----------|------------------------------------|
//! | `Short`   | 250 on                             |
//! | `Long`    | 750 on                             |
//! | `Double`  | 250 on, 250 off, 250 on, 250 off   |
//! | `Startup` | 200 on, 200 off ×2, then 500 on    |
//!
//! Every pattern blocks until it finishes and leaves the pin LOW.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{Beep, BuzzerPort};

/// `(on_ms, off_ms)` segments.
type Segment = (u32, u32);

const SHORT: &[Segment] = &[(250, 0)];
const LONG: &[Segment] = &[(750, 0)];
const DOUBLE: &[Segment] = &[(250, 250), (250, 250)];
const STARTUP: &[Segment] = &[(200, 200), (200, 200), (500, 0)];

pub fn segments(pattern: Beep) -> &'static [Segment] {
    match pattern {
        Beep::Short => SHORT,
        Beep::Long => LONG,
        Beep::Double => DOUBLE,
        Beep::Startup => STARTUP,
    }
}

/// Total blocking time of a pattern.
pub fn duration_ms(pattern: Beep) -> u32 {
    segments(pattern).iter().map(|(on, off)| on + off).sum()
}

pub struct Buzzer<P, D> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Buzzer<P, D> {
    pub fn new(mut pin: P, delay: D) -> Self {
        let _ = pin.set_low();
        Self { pin, delay }
    }
}

impl<P: OutputPin, D: DelayNs> BuzzerPort for Buzzer<P, D> {
    fn beep(&mut self, pattern: Beep) {
        for &(on, off) in segments(pattern) {
            if self.pin.set_high().is_err() {
                warn!("Buzzer: pin write failed, skipping {:?}", pattern);
                return;
            }
            self.delay.delay_ms(on);
            let _ = self.pin.set_low();
            if off > 0 {
                self.delay.delay_ms(off);
            }
        }
    }
}
