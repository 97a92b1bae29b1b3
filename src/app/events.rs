//! Outbound application events.
//!
//! The [`KioskService`](super::service::KioskService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; the firmware only logs them.

use crate::app::ports::StorageError;
use crate::error::KioskError;
use crate::fsm::MenuState;
use crate::roster::{StudentId, StudentRecord};
use crate::workflow::enroll::AbortReason;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the roster size after boot load).
    Started { records: usize },

    /// The boot load read this many records.
    RosterLoaded { count: usize },

    /// The stored count exceeded capacity; the roster was discarded.
    /// `error` is always [`KioskError::StoreCorrupted`].
    RosterCorrupted { error: KioskError, stored_count: u8 },

    /// The storage backend failed during boot load.
    RosterUnreadable(StorageError),

    /// The Menu Navigator switched menus.
    MenuChanged { from: MenuState, to: MenuState },

    /// An enrollment was committed to the roster.
    AttendanceRecorded(StudentRecord),

    /// A submitted entry failed one of the enrollment checks.
    EntryRejected(KioskError),

    /// An enrollment session ended without a record.
    SessionAborted(AbortReason),

    /// A search matched a roster record.
    StudentFound(StudentRecord),

    /// A record was removed from the roster.
    StudentRemoved(StudentRecord),

    /// A search or removal found no record with this ID.
    LookupMissed(StudentId),

    /// The roster report went out over the serial link.
    DataTransmitted { records: usize },

    /// The traffic monitor counted one more passer-by.
    TrafficCounted { total: u16 },
}
