//! Enrollment Workflow: collect, check, and commit one attendance entry.
//!
//! ```text
//!              digit / * (non-empty)
//!               ┌──────────┐
//!               ▼          │
//!  start ──▶ COLLECTING ───┘──#──▶ COMMITTING ──ok──▶ DONE
//!               │   ▲                   │
//!               │   └──── rejected ─────┘
//!               │
//!               ├── * (empty) ─────────────────────▶ ABORTED(Back)
//!               └── idle ≥ limit ──────────────────▶ ABORTED(Timeout)
//! ```
//!
//! The timeout is checked on every step, key or no key, before the key
//! is looked at.  Any keypress restarts the idle window.

use log::{debug, info};

use super::buffer::CandidateBuffer;
use crate::app::commands::Key;
use crate::app::ports::EepromPort;
use crate::error::KioskError;
use crate::roster::{RecordStore, StudentId, StudentRecord, validate};

/// Why a session ended without a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// `*` on an empty buffer.
    Back,
    /// No keypress within the time limit.
    Timeout,
}

/// Outcome of one [`EnrollSession::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollStep {
    /// Still collecting.
    Continue,
    /// The submission failed a check.  The buffer is cleared and the
    /// session keeps collecting.
    Rejected(KioskError),
    /// The record was committed.  Terminal.
    Recorded(StudentRecord),
    /// Terminal, roster untouched.
    Aborted(AbortReason),
}

/// One run of the Enrollment Workflow.
#[derive(Debug, Clone)]
pub struct EnrollSession {
    buffer: CandidateBuffer,
    /// Clock seconds at entry or at the last keypress.
    session_start: u32,
    active: bool,
    limit_secs: u32,
}

impl EnrollSession {
    pub fn new(now_secs: u32, limit_secs: u32) -> Self {
        debug!("Enroll: session opened at t={}s", now_secs);
        Self {
            buffer: CandidateBuffer::new(),
            session_start: now_secs,
            active: true,
            limit_secs,
        }
    }

    /// Advance the session by one poll.
    ///
    /// `key` is the freshly routed key, if any.  Once a terminal step has
    /// been returned the session is inert and further calls return
    /// [`EnrollStep::Continue`] without effect.
    pub fn step<E: EepromPort>(
        &mut self,
        key: Option<Key>,
        now_secs: u32,
        store: &mut RecordStore<E>,
    ) -> EnrollStep {
        if !self.active {
            return EnrollStep::Continue;
        }

        if self.elapsed(now_secs) >= self.limit_secs {
            info!(
                "Enroll: no keypress for {}s, aborting session",
                self.elapsed(now_secs)
            );
            self.end();
            return EnrollStep::Aborted(AbortReason::Timeout);
        }

        let Some(key) = key else {
            return EnrollStep::Continue;
        };
        self.session_start = now_secs;

        match key {
            Key::Digit(d) => {
                self.buffer.push(d);
                EnrollStep::Continue
            }
            Key::Back => {
                if self.buffer.pop() {
                    EnrollStep::Continue
                } else {
                    self.end();
                    EnrollStep::Aborted(AbortReason::Back)
                }
            }
            Key::Submit => self.commit(now_secs, store),
        }
    }

    /// Seconds left before the session times out.  Internal bookkeeping;
    /// the prompt does not show it.
    pub fn remaining_secs(&self, now_secs: u32) -> u32 {
        self.limit_secs.saturating_sub(self.elapsed(now_secs))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn typed(&self) -> &str {
        self.buffer.as_str()
    }

    // ── Internal ──────────────────────────────────────────────

    fn elapsed(&self, now_secs: u32) -> u32 {
        now_secs.wrapping_sub(self.session_start)
    }

    fn end(&mut self) {
        self.active = false;
        self.buffer.clear();
    }

    fn commit<E: EepromPort>(&mut self, now_secs: u32, store: &mut RecordStore<E>) -> EnrollStep {
        let outcome = self
            .check(store)
            .and_then(|id| store.append(id, now_secs));
        self.buffer.clear();

        match outcome {
            Ok(record) => {
                self.end();
                EnrollStep::Recorded(record)
            }
            Err(e) => {
                info!("Enroll: submission rejected ({})", e);
                EnrollStep::Rejected(e)
            }
        }
    }

    /// The ordered pre-commit checks, short-circuiting on the first failure.
    fn check<E: EepromPort>(&self, store: &RecordStore<E>) -> Result<StudentId, KioskError> {
        if !self.buffer.is_complete() {
            return Err(KioskError::IncompleteInput);
        }
        if !validate(self.buffer.as_str()) {
            return Err(KioskError::InvalidFormat);
        }
        let id = self.buffer.to_id().ok_or(KioskError::IncompleteInput)?;
        if store.contains(&id) {
            return Err(KioskError::Duplicate);
        }
        if store.is_full() {
            return Err(KioskError::CapacityExceeded);
        }
        Ok(id)
    }
}
