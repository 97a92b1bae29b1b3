//! Fuzz target: `EnrollSession::step`
//!
//! Each input byte is one poll: the low nibble picks a keypad key (or
//! none), the high nibble is how many seconds pass first.  Verifies:
//! - No panics under any key/time sequence
//! - At most one record is committed per session, and it is valid
//! - Nothing is committed after a terminal step
//!
//! cargo fuzz run fuzz_keypad_entry

#![no_main]

use libfuzzer_sys::fuzz_target;
use rollcall::app::commands::Key;
use rollcall::app::ports::{EepromPort, StorageError};
use rollcall::roster::RecordStore;
use rollcall::workflow::enroll::{EnrollSession, EnrollStep};

const LAYOUT: &[u8; 12] = b"0123456789*#";

struct Sink;

impl EepromPort for Sink {
    fn read_bytes(&self, _offset: usize, _buf: &mut [u8]) -> Result<(), StorageError> {
        Err(StorageError::NotFound)
    }

    fn write_bytes(&mut self, _offset: usize, _data: &[u8]) -> Result<(), StorageError> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let mut store = RecordStore::new(Sink);
    let mut session = EnrollSession::new(0, 10);
    let mut now = 0u32;
    let mut finished = false;

    for &b in data {
        now = now.wrapping_add(u32::from(b >> 4));
        let key = LAYOUT
            .get(usize::from(b & 0x0F))
            .and_then(|&c| Key::from_char(c as char));

        match session.step(key, now, &mut store) {
            EnrollStep::Recorded(rec) => {
                assert!(!finished);
                assert!(rec.id.is_valid());
                finished = true;
            }
            EnrollStep::Aborted(_) => {
                assert!(!finished);
                finished = true;
            }
            EnrollStep::Continue | EnrollStep::Rejected(_) => {}
        }
        assert_eq!(session.is_active(), !finished);
    }

    assert!(store.len() <= 1);
});
