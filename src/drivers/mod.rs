//! Peripheral drivers, hardware initialisation, and timing helpers.

pub mod buzzer;
pub mod delay;
pub mod display;
pub mod gpio;
pub mod hw_init;
pub mod hw_timer;
pub mod keypad;
pub mod watchdog;
