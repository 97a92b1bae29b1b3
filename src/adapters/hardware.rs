//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns every kiosk driver and exposes them through the ports bundled in
//! [`KioskHardware`](crate::app::ports::KioskHardware).  This is the only
//! module in the system that wires drivers to pins.  On non-espidf
//! targets the underlying GPIO, ADC, and delay calls fall back to their
//! simulation stand-ins.

use std::io::Write;

use embedded_hal::delay::DelayNs;

use crate::app::ports::{
    Beep, BuzzerPort, DisplayPort, DistanceReading, KeypadPort, SensorPort, SerialLinkPort,
};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::delay::SysDelay;
use crate::drivers::display::FrameBuffer;
use crate::drivers::gpio::RawGpio;
use crate::drivers::hw_init;
use crate::drivers::keypad::KeypadMatrix;
use crate::pins;
use crate::sensors::{Lm35, Ultrasonic};

use super::serial::SerialLink;

/// Concrete adapter that combines all hardware behind port traits.
pub struct KioskHardwareAdapter<W: Write> {
    keypad: KeypadMatrix<RawGpio, RawGpio, SysDelay>,
    display: FrameBuffer,
    buzzer: Buzzer<RawGpio, SysDelay>,
    lm35: Lm35,
    ranger: Ultrasonic<RawGpio, RawGpio, SysDelay>,
    serial: SerialLink<W>,
    delay: SysDelay,
}

impl KioskHardwareAdapter<std::io::Stdout> {
    /// Wire every driver to the board pins, serial out on the console.
    ///
    /// Pins must already be configured by
    /// [`hw_init::init_peripherals`](crate::drivers::hw_init::init_peripherals).
    pub fn from_board() -> Self {
        Self::new(SerialLink::console())
    }
}

impl<W: Write> KioskHardwareAdapter<W> {
    pub fn new(serial: SerialLink<W>) -> Self {
        let rows = pins::KEYPAD_ROW_GPIOS.map(RawGpio::new);
        let cols = pins::KEYPAD_COL_GPIOS.map(RawGpio::new);
        Self {
            keypad: KeypadMatrix::new(rows, cols, SysDelay::new()),
            display: FrameBuffer::new(),
            buzzer: Buzzer::new(RawGpio::new(pins::BUZZER_GPIO), SysDelay::new()),
            lm35: Lm35::new(pins::LM35_ADC_CHANNEL),
            ranger: Ultrasonic::new(
                RawGpio::new(pins::ULTRASONIC_TRIG_GPIO),
                RawGpio::new(pins::ULTRASONIC_ECHO_GPIO),
                SysDelay::new(),
                hw_init::micros,
            ),
            serial,
            delay: SysDelay::new(),
        }
    }

    pub fn display(&self) -> &FrameBuffer {
        &self.display
    }

    pub fn serial(&self) -> &SerialLink<W> {
        &self.serial
    }
}

// ── KeypadPort ────────────────────────────────────────────────

impl<W: Write> KeypadPort for KioskHardwareAdapter<W> {
    fn poll_key(&mut self) -> Option<char> {
        self.keypad.poll_key()
    }
}

// ── DisplayPort ───────────────────────────────────────────────

impl<W: Write> DisplayPort for KioskHardwareAdapter<W> {
    fn clear(&mut self) {
        self.display.clear();
    }

    fn move_cursor(&mut self, col: u8, row: u8) {
        self.display.move_cursor(col, row);
    }

    fn print(&mut self, text: &str) {
        self.display.print(text);
    }

    fn flush(&mut self) {
        self.display.flush();
    }
}

// ── BuzzerPort ────────────────────────────────────────────────

impl<W: Write> BuzzerPort for KioskHardwareAdapter<W> {
    fn beep(&mut self, pattern: Beep) {
        self.buzzer.beep(pattern);
    }
}

// ── SensorPort ────────────────────────────────────────────────

impl<W: Write> SensorPort for KioskHardwareAdapter<W> {
    fn read_temperature_raw(&mut self) -> u16 {
        self.lm35.read_raw()
    }

    fn measure_distance(&mut self) -> DistanceReading {
        self.ranger.measure()
    }
}

// ── SerialLinkPort ────────────────────────────────────────────

impl<W: Write> SerialLinkPort for KioskHardwareAdapter<W> {
    fn transmit_line(&mut self, line: &str) {
        self.serial.transmit_line(line);
    }
}

// ── Dwell delays ──────────────────────────────────────────────

impl<W: Write> DelayNs for KioskHardwareAdapter<W> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
