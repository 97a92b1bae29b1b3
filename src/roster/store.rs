//! Record Store: the roster plus its write-through EEPROM mirror.
//!
//! The in-memory roster is a fixed-capacity `heapless::Vec`, so capacity is
//! enforced by the type as well as by the explicit check.  Every
//! successful [`append`](RecordStore::append) and
//! [`remove`](RecordStore::remove) rewrites the full image via
//! [`save`](RecordStore::save) before returning.
//!
//! ## Persistence caveats
//!
//! The image is overwritten in place with no shadow copy, so a power loss
//! mid-save can tear it.  Write failures have no acknowledgment path to
//! the user: they are logged and the in-memory mutation stands.

use heapless::Vec;
use log::{info, warn};

use super::layout::{self, RECORD_SIZE};
use super::{MAX_STUDENTS, StudentId, StudentRecord};
use crate::app::ports::{EepromPort, StorageError};
use crate::error::{self, KioskError};

/// Result of reading the roster at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This many records were read (zero on a never-written store).
    Loaded(usize),
    /// The stored count exceeded capacity; everything was discarded.
    Corrupted { stored_count: u8 },
    /// The backend failed; the roster starts empty.
    Unreadable(StorageError),
}

pub struct RecordStore<E> {
    records: Vec<StudentRecord, MAX_STUDENTS>,
    eeprom: E,
}

impl<E: EepromPort> RecordStore<E> {
    /// Wrap a backend.  The roster starts empty; call [`load`](Self::load)
    /// to read the persisted image.
    pub fn new(eeprom: E) -> Self {
        Self {
            records: Vec::new(),
            eeprom,
        }
    }

    // ── Persistence ───────────────────────────────────────────

    /// Replace the in-memory roster with the persisted image.
    ///
    /// Stored IDs are not re-validated here; readers filter with
    /// [`present`](Self::present).
    pub fn load(&mut self) -> LoadOutcome {
        self.records.clear();

        let mut count = [0u8; 1];
        match self.eeprom.read_bytes(layout::COUNT_OFFSET, &mut count) {
            Ok(()) => {}
            Err(StorageError::NotFound) => {
                info!("RecordStore: no stored roster, starting empty");
                return LoadOutcome::Loaded(0);
            }
            Err(e) => {
                warn!("RecordStore: count unreadable ({}), starting empty", e);
                return LoadOutcome::Unreadable(e);
            }
        }

        let stored_count = count[0];
        if stored_count as usize > MAX_STUDENTS {
            warn!(
                "RecordStore: stored count {} exceeds capacity {}, discarding roster",
                stored_count, MAX_STUDENTS
            );
            return LoadOutcome::Corrupted { stored_count };
        }

        for i in 0..stored_count as usize {
            let mut raw = [0u8; RECORD_SIZE];
            if let Err(e) = self.eeprom.read_bytes(layout::record_offset(i), &mut raw) {
                warn!("RecordStore: record {} unreadable ({}), starting empty", i, e);
                self.records.clear();
                return LoadOutcome::Unreadable(e);
            }
            // Cannot overflow: stored_count <= MAX_STUDENTS was checked above.
            let _ = self.records.push(layout::decode_record(&raw));
        }

        info!("RecordStore: loaded {} record(s)", self.records.len());
        LoadOutcome::Loaded(self.records.len())
    }

    /// Blank any record whose ID fails validation, then overwrite the
    /// persisted image with the count and every live record.
    pub fn save(&mut self) -> error::Result<()> {
        for rec in self.records.iter_mut() {
            if !rec.id.is_valid() {
                if !rec.id.is_blank() {
                    warn!("RecordStore: blanking invalid record {:?}", rec.id);
                }
                *rec = StudentRecord::BLANK;
            }
        }

        let mut image = [0u8; layout::IMAGE_SIZE];
        let used = layout::encode_image(&self.records, &mut image);
        self.eeprom.write_bytes(layout::COUNT_OFFSET, &image[..used])?;
        Ok(())
    }

    // ── Mutation ──────────────────────────────────────────────

    /// Add a record and persist the roster.
    pub fn append(&mut self, id: StudentId, timestamp: u32) -> Result<StudentRecord, KioskError> {
        if self.is_full() {
            return Err(KioskError::CapacityExceeded);
        }
        if self.contains(&id) {
            return Err(KioskError::Duplicate);
        }

        let record = StudentRecord::new(id, timestamp);
        if self.records.push(record).is_err() {
            return Err(KioskError::CapacityExceeded);
        }
        info!("RecordStore: appended {} at t={}s", id, timestamp);
        self.persist();
        Ok(record)
    }

    /// Remove the record with exactly this ID, shifting later records one
    /// slot earlier, and persist the roster.
    pub fn remove(&mut self, id: &StudentId) -> Result<StudentRecord, KioskError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == *id)
            .ok_or(KioskError::NotFound)?;

        let removed = self.records.remove(index);
        info!("RecordStore: removed {} from slot {}", removed.id, index);
        self.persist();
        Ok(removed)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn find(&self, id: &StudentId) -> Option<StudentRecord> {
        self.records.iter().find(|r| r.id == *id).copied()
    }

    pub fn contains(&self, id: &StudentId) -> bool {
        self.records.iter().any(|r| r.id == *id)
    }

    /// Every slot in insertion order, including ones with invalid IDs.
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Records with a valid ID, in insertion order.  Restartable: clone
    /// the iterator or call again.
    pub fn present(&self) -> impl Iterator<Item = &StudentRecord> + Clone + '_ {
        self.records.iter().filter(|r| r.id.is_valid())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= MAX_STUDENTS
    }

    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }

    // ── Internal ──────────────────────────────────────────────

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!("RecordStore: roster write failed ({}), in-memory copy kept", e);
        }
    }
}
