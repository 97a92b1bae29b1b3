//! Fuzz target: `RecordStore::load` / `save`
//!
//! Treats the fuzz input as a persisted roster image and checks:
//! - No panics under any byte sequence, including short images
//! - The loaded roster never exceeds `MAX_STUDENTS`
//! - A stored count above capacity always yields an empty roster
//! - After a save, a second load reads back only valid or blanked slots
//!
//! cargo fuzz run fuzz_roster_image

#![no_main]

use libfuzzer_sys::fuzz_target;
use rollcall::app::ports::{EepromPort, StorageError};
use rollcall::roster::{LoadOutcome, MAX_STUDENTS, RecordStore};

#[derive(Clone)]
struct Image(Vec<u8>);

impl EepromPort for Image {
    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        let src = self
            .0
            .get(offset..offset + buf.len())
            .ok_or(StorageError::OutOfBounds)?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        let end = offset + data.len();
        if self.0.len() < end {
            self.0.resize(end, 0xFF);
        }
        self.0[offset..end].copy_from_slice(data);
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let mut store = RecordStore::new(Image(data.to_vec()));
    let outcome = store.load();
    assert!(store.len() <= MAX_STUDENTS);

    if let Some(&count) = data.first() {
        if count as usize > MAX_STUDENTS {
            assert_eq!(outcome, LoadOutcome::Corrupted { stored_count: count });
            assert!(store.is_empty());
        }
    }

    if store.save().is_ok() {
        let mut again = RecordStore::new(store.eeprom().clone());
        assert_eq!(again.load(), LoadOutcome::Loaded(store.len()));
        assert!(again
            .records()
            .iter()
            .all(|r| r.id.is_valid() || r.id.is_blank()));
    }
});
