//! `embedded-hal` 1.0 pin wrappers over the raw GPIO helpers in
//! [`hw_init`](super::hw_init).
//!
//! Pins must already be configured by
//! [`hw_init::init_peripherals`](super::hw_init::init_peripherals); these
//! wrappers only read and write levels, so they never fail.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use super::hw_init;

/// One GPIO number, used as either an input or an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawGpio {
    pin: i32,
}

impl RawGpio {
    pub const fn new(pin: i32) -> Self {
        Self { pin }
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }
}

impl ErrorType for RawGpio {
    type Error = Infallible;
}

impl OutputPin for RawGpio {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, true);
        Ok(())
    }
}

impl InputPin for RawGpio {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.pin))
    }
}
