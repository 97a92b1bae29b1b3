//! LM35 analog temperature sensor (10 mV/°C).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the LM35 channel via the ADC1 oneshot API
//! (initialised by hw_init) and scales the 12-bit sample to 10 bits.
//! On host/test: reads from a static AtomicU16 for injection.
//!
//! Conversion to degrees lives in
//! [`TemperatureReading`](crate::workflow::monitor::TemperatureReading);
//! this driver only delivers raw counts.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// 10-bit sample returned on host builds.  52 counts ≈ 25.3 °C.
#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_RAW: AtomicU16 = AtomicU16::new(52);

/// Largest 10-bit count.
pub const RAW_MAX: u16 = 1023;

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temp_raw(raw: u16) {
    SIM_TEMP_RAW.store(raw.min(RAW_MAX), Ordering::Relaxed);
}

pub struct Lm35 {
    channel: u32,
    last_raw: u16,
}

impl Lm35 {
    pub fn new(channel: u32) -> Self {
        Self {
            channel,
            last_raw: 0,
        }
    }

    /// One 10-bit sample.
    pub fn read_raw(&mut self) -> u16 {
        let raw = self.read_adc().min(RAW_MAX);
        if raw != self.last_raw {
            log::trace!("LM35 ch{}: {} -> {}", self.channel, self.last_raw, raw);
            self.last_raw = raw;
        }
        raw
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        // 12-bit oneshot → 10-bit scale used by the conversion.
        hw_init::adc1_read(self.channel) >> 2
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_TEMP_RAW.load(Ordering::Relaxed)
    }
}
