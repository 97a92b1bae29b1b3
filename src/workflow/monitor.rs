//! Sensor monitor screens: temperature and passer-by traffic.
//!
//! Both monitors refresh on a fixed interval until `*` is pressed.  The
//! interval wait itself is the service's job; this module only turns a
//! reading into screen lines and, for traffic, keeps the running count.

use log::debug;

use crate::app::ports::DistanceReading;
use crate::app::screens::{BACK_FOOTER, Line, line};

/// Full-scale ADC count for the 10-bit LM35 channel.
const ADC_FULL_SCALE: u32 = 1024;
/// ADC reference in millivolts.
const ADC_REF_MV: u32 = 5000;

/// One converted LM35 sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureReading {
    pub raw: u16,
    /// Tenths of a degree Celsius.  At 10 mV/°C this equals millivolts.
    pub tenths_c: u32,
}

impl TemperatureReading {
    pub fn from_raw(raw: u16) -> Self {
        let millivolts = u32::from(raw) * ADC_REF_MV / ADC_FULL_SCALE;
        Self {
            raw,
            tenths_c: millivolts,
        }
    }

    pub fn whole(&self) -> u32 {
        self.tenths_c / 10
    }

    pub fn tenth(&self) -> u32 {
        self.tenths_c % 10
    }

    pub fn screen(&self) -> [Line; 4] {
        [
            line(format_args!("Temperature:")),
            line(format_args!("ADC:{}", self.raw)),
            line(format_args!("Temp:{}.{}C", self.whole(), self.tenth())),
            line(format_args!("{BACK_FOOTER}")),
        ]
    }
}

/// Counts readings at or below the threshold as one passer-by each.
#[derive(Debug, Clone)]
pub struct TrafficMonitor {
    count: u16,
    threshold_cm: u16,
}

impl TrafficMonitor {
    pub fn new(threshold_cm: u16) -> Self {
        Self {
            count: 0,
            threshold_cm,
        }
    }

    /// Feed one reading.  Returns `true` when it was counted.
    pub fn observe(&mut self, reading: DistanceReading) -> bool {
        match reading {
            DistanceReading::Centimetres(cm) if cm <= self.threshold_cm => {
                self.count = self.count.saturating_add(1);
                debug!("Traffic: passer-by at {} cm, total {}", cm, self.count);
                true
            }
            _ => false,
        }
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    /// Title, a blank row, distance, count, footer.
    pub fn screen(&self, reading: DistanceReading) -> [Line; 5] {
        let dist = match reading {
            DistanceReading::Centimetres(cm) => line(format_args!("Dist:{cm} cm")),
            DistanceReading::NoObstacle | DistanceReading::Error => {
                line(format_args!("No Obstacle"))
            }
        };
        [
            line(format_args!("Traffic Monitor")),
            Line::new(),
            dist,
            line(format_args!("Count:{}", self.count)),
            line(format_args!("{BACK_FOOTER}")),
        ]
    }
}
