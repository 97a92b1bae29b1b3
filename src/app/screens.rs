//! Fixed notice texts and small formatting helpers.
//!
//! Screens are lists of lines drawn top-down from row 0.  An empty line
//! leaves its row blank.

use core::fmt::Write;

use heapless::String;

use super::ports::DisplayPort;
use crate::error::KioskError;
use crate::roster::{ID_LEN, StudentId, StudentRecord};

/// One display line.  21 glyphs fit across the panel.
pub type Line = String<24>;

pub const RECORDED: &[&str] = &["Attendance", "Recorded!"];
pub const REMOVED: &[&str] = &["Student", "Removed!"];
pub const REMOVE_MISSED: &[&str] = &["ID not found!"];
pub const SEARCH_MISSED: &[&str] = &["No Record", "Exists!"];
pub const NO_STUDENTS: &[&str] = &["No Students Present"];
pub const SENDING: &[&str] = &["Sending..."];

pub const ENROLL_TITLE: &str = "Enter ID:";
pub const SEARCH_TITLE: &str = "Enter ID:";
pub const REMOVE_TITLE: &str = "Remove Student";
pub const ENTRY_FOOTER: &str = "*:Back #:Submit";
pub const BACK_FOOTER: &str = "*:Back";

/// Two-line notice shown for a rejected entry.
pub fn rejection(err: KioskError) -> &'static [&'static str] {
    match err {
        KioskError::IncompleteInput => &["ID must be", "8 digits!"],
        KioskError::InvalidFormat => &["Invalid ID", "Format!"],
        KioskError::Duplicate => &["Already", "Present!"],
        KioskError::CapacityExceeded => &["Maximum", "Reached!"],
        KioskError::NotFound => REMOVE_MISSED,
        KioskError::Timeout => &["Time Limit", "Exceeded!"],
        // Discarded silently at boot; the panel never shows it.
        KioskError::StoreCorrupted => &[],
    }
}

/// Clear the panel, draw `lines`, and push the frame.
pub fn show<S: AsRef<str>>(display: &mut impl DisplayPort, lines: &[S]) {
    display.clear();
    for (row, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if !line.is_empty() {
            display.move_cursor(0, row as u8);
            display.print(line);
        }
    }
    display.flush();
}

/// Title on row 0, the typed digits on row 1 with a `_` cursor while
/// incomplete, and an optional footer on row 2.
pub fn entry_prompt(
    display: &mut impl DisplayPort,
    title: &str,
    typed: &str,
    footer: Option<&str>,
) {
    let mut echo: Line = String::new();
    let _ = echo.push_str(typed);
    if typed.len() < ID_LEN {
        let _ = echo.push('_');
    }
    show(display, &[title, echo.as_str(), footer.unwrap_or("")]);
}

/// `hh:mm` derived from the record's uptime timestamp.
pub fn clock_time(record: &StudentRecord) -> String<8> {
    let mut s = String::new();
    let _ = write!(s, "{:02}:{:02}", record.hours(), record.minutes());
    s
}

/// `Time: hh:mm`.
pub fn time_line(record: &StudentRecord) -> Line {
    let mut s = Line::new();
    let _ = write!(s, "Time: {}", clock_time(record));
    s
}

/// `<prefix><id>`, e.g. `ID:23001001`.
pub fn id_line(prefix: &str, id: &StudentId) -> Line {
    let mut s = Line::new();
    let _ = write!(s, "{prefix}{id}");
    s
}

/// Any `Display` value as a line, truncated at capacity.
pub fn line(args: core::fmt::Arguments<'_>) -> Line {
    let mut s = Line::new();
    let _ = Truncating(&mut s).write_fmt(args);
    s
}

/// Pushes glyph by glyph and drops whatever no longer fits.
struct Truncating<'a>(&'a mut Line);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
