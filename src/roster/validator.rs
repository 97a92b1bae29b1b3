//! Student ID grammar.
//!
//! ```text
//!   2  [0-3]  DDD  SSS
//!   │    │     │    └─ sequence number 001–999
//!   │    │     └────── department code 001–999
//!   └────┴──────────── enrollment year 20–23
//! ```

use super::ID_LEN;

/// Check an 8-character ID against the grammar.  Pure, no side effects.
pub fn validate(id: &str) -> bool {
    validate_bytes(id.as_bytes())
}

/// Byte-level form of [`validate`], used on raw persisted IDs that may
/// not be UTF-8.
pub fn validate_bytes(id: &[u8]) -> bool {
    let Ok(id) = <&[u8; ID_LEN]>::try_from(id) else {
        return false;
    };

    if id[0] != b'2' || !(b'0'..=b'3').contains(&id[1]) {
        return false;
    }

    code_in_range(&id[2..5]) && code_in_range(&id[5..8])
}

/// Three ASCII digits, not all zero.
fn code_in_range(code: &[u8]) -> bool {
    code.iter().all(u8::is_ascii_digit) && code.iter().any(|&b| b != b'0')
}
