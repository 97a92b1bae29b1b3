//! GPIO / peripheral pin assignments for the Rollcall kiosk board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// 4x3 membrane keypad
// ---------------------------------------------------------------------------

/// Row lines, top to bottom.  Driven LOW one at a time during a scan,
/// held HIGH otherwise.
pub const KEYPAD_ROW_GPIOS: [i32; 4] = [4, 5, 6, 7];
/// Column lines, left to right.  Inputs with pull-ups; a pressed key pulls
/// its column LOW while its row is driven.
pub const KEYPAD_COL_GPIOS: [i32; 3] = [15, 16, 17];

// ---------------------------------------------------------------------------
// Buzzer
// ---------------------------------------------------------------------------

/// Active buzzer, HIGH = sounding.
pub const BUZZER_GPIO: i32 = 38;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// Ultrasonic ranger trigger (output).
pub const ULTRASONIC_TRIG_GPIO: i32 = 12;
/// Ultrasonic ranger echo (input).
pub const ULTRASONIC_ECHO_GPIO: i32 = 13;

/// LM35 analog output on ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const LM35_ADC_CHANNEL: u32 = 0;

// ---------------------------------------------------------------------------
// Serial link (roster transmit)
// ---------------------------------------------------------------------------

/// Console UART on its default pins.  Roster reports go out on the same
/// port as the log.
pub const UART_NUM: i32 = 0;
