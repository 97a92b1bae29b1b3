//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ KioskService (domain)
//! ```
//!
//! Driven adapters (keypad, display, buzzer, sensors, serial link, EEPROM,
//! event sinks) implement these traits.  The
//! [`KioskService`](super::service::KioskService) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! Dwell periods (how long a notice stays on screen) are a collaborator
//! concern: the service asks for them through [`embedded_hal::delay::DelayNs`],
//! which host tests implement by recording instead of sleeping.

use embedded_hal::delay::DelayNs;

use crate::config::KioskConfig;

// ───────────────────────────────────────────────────────────────
// Keypad port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the 4x3 keypad.
pub trait KeypadPort {
    /// Return at most one settled keypress, or `None` when no key is down.
    ///
    /// Debouncing belongs to the adapter.  A key that stays down is
    /// reported again on every call; edge detection is the caller's job.
    fn poll_key(&mut self) -> Option<char>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Text display primitives.  `col`/`row` are character cells.
pub trait DisplayPort {
    fn clear(&mut self);
    fn move_cursor(&mut self, col: u8, row: u8);
    fn print(&mut self, text: &str);
    /// Push the composed frame to the panel.
    fn flush(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Buzzer port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Audible cue patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beep {
    /// 250 ms tick (traffic count, empty roster).
    Short,
    /// 750 ms tone for every rejected entry and the timeout notice.
    Long,
    /// Two 250 ms tones, used for a recorded attendance.
    Double,
    /// Two short beeps then a long one, played once at boot.
    Startup,
}

pub trait BuzzerPort {
    /// Play a pattern.  Blocks for the duration of the pattern.
    fn beep(&mut self, pattern: Beep);
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Outcome of one ultrasonic ranging cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceReading {
    Centimetres(u16),
    /// Echo returned but later than the maximum range.
    NoObstacle,
    /// No echo started at all.
    Error,
}

/// Read-side port used only by the monitor screens.
pub trait SensorPort {
    /// Raw 10-bit ADC sample from the LM35 channel.
    fn read_temperature_raw(&mut self) -> u16;

    /// Run one ultrasonic ranging cycle.
    fn measure_distance(&mut self) -> DistanceReading;
}

// ───────────────────────────────────────────────────────────────
// Serial link port (driven adapter: domain → UART)
// ───────────────────────────────────────────────────────────────

/// Best-effort, fire-and-forget line output.
pub trait SerialLinkPort {
    /// Send `line` followed by CR LF.
    fn transmit_line(&mut self, line: &str);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: tick counter → domain)
// ───────────────────────────────────────────────────────────────

/// Seconds since boot, monotonically non-decreasing.
pub trait ClockPort {
    fn now_secs(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists kiosk configuration.
///
/// Implementations MUST validate config values before persisting.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`KioskConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<KioskConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &KioskConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// EEPROM port (driven adapter: domain ↔ non-volatile bytes)
// ───────────────────────────────────────────────────────────────

/// Byte-addressed non-volatile storage, offsets relative to a fixed base.
///
/// There is no transactional guarantee: a power loss in the middle of a
/// multi-byte write may leave a torn image.
pub trait EepromPort {
    /// Fill `buf` with the bytes starting at `offset`.
    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Overwrite the bytes starting at `offset` with `data`.
    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Hardware bundle
// ───────────────────────────────────────────────────────────────

/// Everything the kiosk service drives on each poll.
///
/// Blanket-implemented, so a single adapter (or a test mock) that
/// implements every port satisfies it.  Taking one `&mut` bundle avoids
/// juggling several mutable borrows while keeping each port explicit.
pub trait KioskHardware:
    KeypadPort + DisplayPort + BuzzerPort + SensorPort + SerialLinkPort + DelayNs
{
}

impl<T> KioskHardware for T where
    T: KeypadPort + DisplayPort + BuzzerPort + SensorPort + SerialLinkPort + DelayNs
{
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`EepromPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested region has never been written.
    NotFound,
    /// Access extends past the end of the storage region.
    OutOfBounds,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "region not written"),
            Self::OutOfBounds => write!(f, "access out of bounds"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
