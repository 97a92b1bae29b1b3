//! Inbound commands to the kiosk service.
//!
//! The keypad is the only input surface.  Raw characters from the
//! [`KeypadPort`](super::ports::KeypadPort) are classified into a [`Key`]
//! before they reach the menu table or a workflow.

/// A classified keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `'0'..='9'`, carried as the ASCII byte.
    Digit(u8),
    /// `'*'`: back, or delete the last digit.
    Back,
    /// `'#'`: submit.
    Submit,
}

impl Key {
    /// Classify a keypad character.  Anything outside the 4x3 layout is `None`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8)),
            '*' => Some(Self::Back),
            '#' => Some(Self::Submit),
            _ => None,
        }
    }

    /// The keypad character this key came from.
    pub fn as_char(self) -> char {
        match self {
            Self::Digit(b) => b as char,
            Self::Back => '*',
            Self::Submit => '#',
        }
    }
}
