//! Unified error types for the Rollcall firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the
//! top-level loop handles failures uniformly.  All variants are `Copy`
//! so they pass through the workflows and event sink without allocation.

use core::fmt;

use crate::app::ports::{ConfigError, StorageError};

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A kiosk workflow or roster operation was rejected.
    Kiosk(KioskError),
    /// The persistence backend failed.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kiosk(e) => write!(f, "kiosk: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Kiosk errors
// ---------------------------------------------------------------------------

/// Every locally-recovered failure the kiosk can report to the user.
///
/// None of these are fatal: the workflow that detects one shows its
/// notice, clears transient input, and either resumes collecting input or
/// hands control back to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KioskError {
    /// Submit pressed with fewer than 8 digits buffered.
    IncompleteInput,
    /// 8 digits buffered but the ID grammar check failed.
    InvalidFormat,
    /// The ID is already on the roster.
    Duplicate,
    /// The roster already holds its maximum number of records.
    CapacityExceeded,
    /// No roster record matches the requested ID.
    NotFound,
    /// The enrollment session saw no keystroke within the time limit.
    Timeout,
    /// The stored roster count exceeded capacity and was discarded.
    StoreCorrupted,
}

impl fmt::Display for KioskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteInput => write!(f, "ID must be 8 digits"),
            Self::InvalidFormat => write!(f, "invalid ID format"),
            Self::Duplicate => write!(f, "already present"),
            Self::CapacityExceeded => write!(f, "roster full"),
            Self::NotFound => write!(f, "ID not found"),
            Self::Timeout => write!(f, "entry time limit exceeded"),
            Self::StoreCorrupted => write!(f, "stored roster corrupted"),
        }
    }
}

impl From<KioskError> for Error {
    fn from(e: KioskError) -> Self {
        Self::Kiosk(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
