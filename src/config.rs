//! System configuration parameters
//!
//! All tunable parameters for the Rollcall kiosk.
//! Values can be overridden via NVS (non-volatile storage).
//!
//! Roster capacity, ID length and the persisted roster layout are
//! compile-time constants in [`crate::roster`], not configuration.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskConfig {
    // --- Enrollment ---
    /// Seconds without an accepted keystroke before an enrollment session aborts
    pub entry_timeout_secs: u32,

    // --- Dwell periods ---
    /// Hold time for enrollment/search notices (milliseconds)
    pub notice_dwell_ms: u32,
    /// Hold time for removal outcome notices (milliseconds)
    pub remove_dwell_ms: u32,
    /// Hold time per record while listing present students (milliseconds)
    pub list_dwell_ms: u32,
    /// Hold time for the "No Students Present" notice (milliseconds)
    pub empty_dwell_ms: u32,
    /// Hold time per record while transmitting (milliseconds)
    pub transmit_dwell_ms: u32,

    // --- Monitors ---
    /// Temperature monitor refresh interval (milliseconds)
    pub temp_refresh_ms: u32,
    /// Traffic monitor refresh interval (milliseconds)
    pub traffic_refresh_ms: u32,
    /// A distance at or below this counts one passer-by (centimetres)
    pub traffic_count_threshold_cm: u16,

    // --- Serial ---
    /// Serial link baud rate
    pub serial_baud: u32,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            // Enrollment
            entry_timeout_secs: 10,

            // Dwell
            notice_dwell_ms: 2000,
            remove_dwell_ms: 3000,
            list_dwell_ms: 500,
            empty_dwell_ms: 1000,
            transmit_dwell_ms: 1000,

            // Monitors
            temp_refresh_ms: 500,
            traffic_refresh_ms: 2000,
            traffic_count_threshold_cm: 3,

            // Serial
            serial_baud: 9600,
        }
    }
}
