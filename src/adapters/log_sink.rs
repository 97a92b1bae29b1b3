//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::screens::clock_time;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { records } => {
                info!("START | records={}", records);
            }
            AppEvent::RosterLoaded { count } => {
                info!("ROSTER | loaded {} records", count);
            }
            AppEvent::RosterCorrupted { error, stored_count } => {
                warn!("ROSTER | {} (count byte {}), roster reset", error, stored_count);
            }
            AppEvent::RosterUnreadable(e) => {
                warn!("ROSTER | unreadable ({}), starting empty", e);
            }
            AppEvent::MenuChanged { from, to } => {
                info!("MENU | {:?} -> {:?}", from, to);
            }
            AppEvent::AttendanceRecorded(rec) => {
                info!("ATTEND | id={} t={}s ({})", rec.id, rec.timestamp, clock_time(rec));
            }
            AppEvent::EntryRejected(e) => {
                info!("ATTEND | rejected: {}", e);
            }
            AppEvent::SessionAborted(reason) => {
                info!("ATTEND | session aborted ({:?})", reason);
            }
            AppEvent::StudentFound(rec) => {
                info!("LOOKUP | found id={} at {}", rec.id, clock_time(rec));
            }
            AppEvent::StudentRemoved(rec) => {
                info!("LOOKUP | removed id={}", rec.id);
            }
            AppEvent::LookupMissed(id) => {
                info!("LOOKUP | no record for id={}", id);
            }
            AppEvent::DataTransmitted { records } => {
                info!("SERIAL | roster sent, {} records", records);
            }
            AppEvent::TrafficCounted { total } => {
                info!("TRAFFIC | count={}", total);
            }
        }
    }
}
