//! Sensor drivers used by the monitor screens.
//!
//! Neither sensor feeds the attendance core; they are read only while the
//! temperature or traffic monitor is open.

pub mod distance;
pub mod temperature;

pub use distance::Ultrasonic;
pub use temperature::Lm35;
