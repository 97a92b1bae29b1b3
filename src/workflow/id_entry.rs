//! ID entry for the Search and Remove lookups.
//!
//! Same digit / backspace / submit contract as enrollment, minus the
//! timeout.  `#` does nothing until all eight digits are in.

use super::buffer::CandidateBuffer;
use crate::app::commands::Key;
use crate::roster::StudentId;

/// Outcome of one [`IdEntry::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStep {
    Continue,
    /// `*` on an empty buffer.
    Cancelled,
    /// `#` on a complete buffer.  The buffer is cleared.
    Submitted(StudentId),
}

#[derive(Debug, Clone, Default)]
pub struct IdEntry {
    buffer: CandidateBuffer,
}

impl IdEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, key: Key) -> EntryStep {
        match key {
            Key::Digit(d) => {
                self.buffer.push(d);
                EntryStep::Continue
            }
            Key::Back => {
                if self.buffer.pop() {
                    EntryStep::Continue
                } else {
                    EntryStep::Cancelled
                }
            }
            Key::Submit => match self.buffer.to_id() {
                Some(id) => {
                    self.buffer.clear();
                    EntryStep::Submitted(id)
                }
                None => EntryStep::Continue,
            },
        }
    }

    pub fn typed(&self) -> &str {
        self.buffer.as_str()
    }
}
