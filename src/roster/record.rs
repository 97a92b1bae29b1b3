//! Student records as held in the roster.

use core::fmt;

use super::{ID_LEN, validator};

/// An 8-byte student ID.
///
/// Stored as raw bytes: IDs loaded from storage are not re-validated, so
/// a corrupted slot may hold anything.  Use [`StudentId::is_valid`] before
/// showing or transmitting one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentId([u8; ID_LEN]);

impl StudentId {
    /// All-zero ID written over slots that fail validation before a save.
    pub const BLANK: Self = Self([0; ID_LEN]);

    pub const fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Take exactly [`ID_LEN`] bytes.  No grammar check.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes: [u8; ID_LEN] = s.as_bytes().try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// The ID as text, or `None` if the bytes are not UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.0).ok()
    }

    pub fn is_valid(&self) -> bool {
        validator::validate_bytes(&self.0)
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // NUL terminates, like the on-device string; other non-printables show as '?'.
        for &b in self.0.iter().take_while(|&&b| b != 0) {
            let c = if b.is_ascii_graphic() { b as char } else { '?' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentId(\"{self}\")")
    }
}

/// One enrolled student.  Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: StudentId,
    /// Clock Supervisor seconds at the moment of enrollment.
    pub timestamp: u32,
}

impl StudentRecord {
    pub const BLANK: Self = Self {
        id: StudentId::BLANK,
        timestamp: 0,
    };

    pub fn new(id: StudentId, timestamp: u32) -> Self {
        Self { id, timestamp }
    }

    /// Hour-of-day derived from the uptime timestamp.
    pub fn hours(&self) -> u8 {
        ((self.timestamp / 3600) % 24) as u8
    }

    /// Minute-of-hour derived from the uptime timestamp.
    pub fn minutes(&self) -> u8 {
        ((self.timestamp / 60) % 60) as u8
    }
}
