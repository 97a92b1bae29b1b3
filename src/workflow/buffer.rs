//! Candidate Buffer: the digits typed so far.

use heapless::String;

use crate::roster::{ID_LEN, StudentId};

/// Up to [`ID_LEN`] ASCII digits.  Discarded with the workflow that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateBuffer {
    digits: String<ID_LEN>,
}

impl CandidateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ASCII digit.  Returns `false` (buffer unchanged) when the
    /// buffer is full or `digit` is not `b'0'..=b'9'`.
    pub fn push(&mut self, digit: u8) -> bool {
        digit.is_ascii_digit() && self.digits.push(digit as char).is_ok()
    }

    /// Drop the last digit.  Returns `false` if the buffer was already empty.
    pub fn pop(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == ID_LEN
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// The buffered ID, once all [`ID_LEN`] digits are in.
    pub fn to_id(&self) -> Option<StudentId> {
        StudentId::parse(&self.digits)
    }
}
