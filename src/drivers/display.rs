//! Character-cell frame buffer for the 21 x 8 text panel.
//!
//! [`DisplayPort`] calls compose into a back buffer; `flush` swaps it to
//! the front and mirrors every row that changed to the log, which is
//! where the panel contents show up on the console.  Text past the right
//! edge is clipped, never wrapped.

use heapless::String;
use log::info;

use crate::app::ports::DisplayPort;

pub const DISPLAY_COLS: usize = 21;
pub const DISPLAY_ROWS: usize = 8;

type Row = String<DISPLAY_COLS>;

#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    back: [Row; DISPLAY_ROWS],
    front: [Row; DISPLAY_ROWS],
    col: usize,
    row: usize,
    flushes: u32,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of a row as last flushed, trailing blanks trimmed.
    pub fn row_text(&self, row: usize) -> &str {
        self.front.get(row).map_or("", |r| r.trim_end())
    }

    /// Every non-empty flushed row, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.front.iter().map(|r| r.trim_end()).filter(|r| !r.is_empty())
    }

    /// Whether any flushed row contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.front.iter().any(|r| r.contains(needle))
    }

    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    fn put_char(&mut self, c: char) {
        if self.row >= DISPLAY_ROWS || self.col >= DISPLAY_COLS {
            return;
        }
        let line = &mut self.back[self.row];
        while line.len() < self.col {
            let _ = line.push(' ');
        }
        if line.len() == self.col {
            let _ = line.push(c);
        } else {
            // Overwrite in place.
            let mut rebuilt = Row::new();
            for (i, existing) in line.chars().enumerate() {
                let _ = rebuilt.push(if i == self.col { c } else { existing });
            }
            *line = rebuilt;
        }
        self.col += 1;
    }
}

impl DisplayPort for FrameBuffer {
    fn clear(&mut self) {
        for r in &mut self.back {
            r.clear();
        }
        self.col = 0;
        self.row = 0;
    }

    fn move_cursor(&mut self, col: u8, row: u8) {
        self.col = col as usize;
        self.row = row as usize;
    }

    fn print(&mut self, text: &str) {
        for c in text.chars() {
            // The panel font is ASCII only.
            self.put_char(if c.is_ascii() { c } else { '?' });
        }
    }

    fn flush(&mut self) {
        self.flushes = self.flushes.wrapping_add(1);
        for (i, (back, front)) in self.back.iter().zip(self.front.iter_mut()).enumerate() {
            if back != front {
                info!("LCD[{}] {}", i, back.as_str());
                front.clone_from(back);
            }
        }
    }
}
