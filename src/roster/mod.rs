//! Attendance roster: records, ID grammar, persisted layout, and the store.
//!
//! ```text
//!   EnrollSession ──append──▶ ┌─────────────┐ ──write_bytes──▶ EepromPort
//!   IdEntry (search/remove) ─▶│ RecordStore │ ◀──read_bytes─── (boot load)
//!   list / transmit ──present─▶└─────────────┘
//! ```
//!
//! The store is the only owner of the roster.  Every mutation rewrites the
//! full persisted image before returning, so nothing ever observes a
//! roster that has not been written through.

pub mod layout;
pub mod record;
pub mod store;
pub mod validator;

pub use record::{StudentId, StudentRecord};
pub use store::{LoadOutcome, RecordStore};
pub use validator::{validate, validate_bytes};

/// Maximum number of records the roster holds.
pub const MAX_STUDENTS: usize = 20;

/// Number of characters in a student ID.
pub const ID_LEN: usize = 8;
