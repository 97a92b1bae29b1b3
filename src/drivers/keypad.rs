//! 4x3 matrix keypad scanner.
//!
//! ```text
//!            col0 col1 col2
//!   row0 ──── 1 ── 2 ── 3
//!   row1 ──── 4 ── 5 ── 6
//!   row2 ──── 7 ── 8 ── 9
//!   row3 ──── * ── 0 ── #
//! ```
//!
//! Rows are outputs idling HIGH; columns are pulled-up inputs.  A scan
//! drives one row LOW at a time, waits for the line to settle, and looks
//! for a LOW column.  A hit is re-read after [`VERIFY_DELAY_MS`] and only
//! reported if the column is still LOW.  The first verified key wins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::trace;

use crate::app::ports::KeypadPort;

pub const ROWS: usize = 4;
pub const COLS: usize = 3;

pub const LAYOUT: [[char; COLS]; ROWS] = [
    ['1', '2', '3'],
    ['4', '5', '6'],
    ['7', '8', '9'],
    ['*', '0', '#'],
];

/// Row line settle time after driving it LOW.
pub const SETTLE_US: u32 = 50;
/// Debounce re-read delay.
pub const VERIFY_DELAY_MS: u32 = 20;

pub struct KeypadMatrix<R, C, D> {
    rows: [R; ROWS],
    cols: [C; COLS],
    delay: D,
}

impl<R: OutputPin, C: InputPin, D: DelayNs> KeypadMatrix<R, C, D> {
    pub fn new(rows: [R; ROWS], cols: [C; COLS], delay: D) -> Self {
        let mut kp = Self { rows, cols, delay };
        kp.release_rows();
        kp
    }

    /// One full scan.  `None` when nothing is held.
    pub fn scan(&mut self) -> Option<char> {
        let mut found = None;
        for row in 0..ROWS {
            self.release_rows();
            if self.rows[row].set_low().is_err() {
                continue;
            }
            self.delay.delay_us(SETTLE_US);

            if let Some(key) = self.verified_column(row) {
                found = Some(key);
                break;
            }
        }
        self.release_rows();
        if let Some(key) = found {
            trace!("Keypad: '{}'", key);
        }
        found
    }

    fn verified_column(&mut self, row: usize) -> Option<char> {
        for col in 0..COLS {
            if self.col_low(col) {
                self.delay.delay_ms(VERIFY_DELAY_MS);
                if self.col_low(col) {
                    return Some(LAYOUT[row][col]);
                }
            }
        }
        None
    }

    /// Read errors count as "not pressed".
    fn col_low(&mut self, col: usize) -> bool {
        self.cols[col].is_low().unwrap_or(false)
    }

    fn release_rows(&mut self) {
        for row in &mut self.rows {
            let _ = row.set_high();
        }
    }
}

impl<R: OutputPin, C: InputPin, D: DelayNs> KeypadPort for KeypadMatrix<R, C, D> {
    fn poll_key(&mut self) -> Option<char> {
        self.scan()
    }
}
