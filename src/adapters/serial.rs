//! Serial link adapter: line output for the roster transmit.
//!
//! Implements [`SerialLinkPort`] over any `std::io::Write`.  On the
//! device that is stdout, which ESP-IDF routes to the console UART
//! configured by [`hw_init`](crate::drivers::hw_init).  Output is
//! best-effort: a failed write is logged and dropped.

use std::io::Write;

use log::warn;

use crate::app::ports::SerialLinkPort;

pub struct SerialLink<W: Write> {
    out: W,
    failures: u32,
}

impl SerialLink<std::io::Stdout> {
    /// The console UART.
    pub fn console() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> SerialLink<W> {
    pub fn new(out: W) -> Self {
        Self { out, failures: 0 }
    }

    /// Lines dropped since boot.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> SerialLinkPort for SerialLink<W> {
    fn transmit_line(&mut self, line: &str) {
        let result = self
            .out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.write_all(b"\r\n"))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            self.failures = self.failures.saturating_add(1);
            warn!("Serial: dropped line ({})", e);
        }
    }
}
