//! Blocking delay used for dwell periods, beeps, and keypad settling.
//!
//! On ESP-IDF: millisecond waits yield to FreeRTOS so the idle task can
//! run; sub-millisecond waits busy-wait in ROM (`Ets`).
//! On host/test: `std::thread::sleep`.

use embedded_hal::delay::DelayNs;

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::delay::{Ets, FreeRtos};

#[derive(Debug, Clone, Copy, Default)]
pub struct SysDelay;

impl SysDelay {
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for SysDelay {
    fn delay_ns(&mut self, ns: u32) {
        Ets::delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        if us >= 1_000 {
            FreeRtos::delay_ms(us / 1_000);
            Ets::delay_us(us % 1_000);
        } else {
            Ets::delay_us(us);
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for SysDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
