//! Persisted roster image.
//!
//! ```text
//!  offset 0        1              13             25
//!         ┌───────┬──────────────┬──────────────┬─ ─ ─
//!         │ count │ id[8] ts[4]  │ id[8] ts[4]  │ …  (count records)
//!         └───────┴──────────────┴──────────────┴─ ─ ─
//! ```
//!
//! `ts` is a little-endian `u32`.  No checksum, no version tag: a count
//! above [`MAX_STUDENTS`] is the only corruption the loader can detect.

use super::{ID_LEN, MAX_STUDENTS, StudentId, StudentRecord};

/// Offset of the count byte.
pub const COUNT_OFFSET: usize = 0;
/// Offset of the first record slot.
pub const RECORDS_OFFSET: usize = 1;
/// Bytes per serialized record.
pub const RECORD_SIZE: usize = ID_LEN + 4;
/// Size of a full image at capacity.
pub const IMAGE_SIZE: usize = RECORDS_OFFSET + MAX_STUDENTS * RECORD_SIZE;

/// Byte offset of record slot `index`.
pub const fn record_offset(index: usize) -> usize {
    RECORDS_OFFSET + index * RECORD_SIZE
}

pub fn encode_record(record: &StudentRecord) -> [u8; RECORD_SIZE] {
    let mut out = [0u8; RECORD_SIZE];
    out[..ID_LEN].copy_from_slice(record.id.as_bytes());
    out[ID_LEN..].copy_from_slice(&record.timestamp.to_le_bytes());
    out
}

pub fn decode_record(raw: &[u8; RECORD_SIZE]) -> StudentRecord {
    let mut id = [0u8; ID_LEN];
    id.copy_from_slice(&raw[..ID_LEN]);
    let mut ts = [0u8; 4];
    ts.copy_from_slice(&raw[ID_LEN..]);
    StudentRecord::new(StudentId::from_bytes(id), u32::from_le_bytes(ts))
}

/// Serialize `records` into `image`, returning the number of bytes used.
///
/// `image` must be at least [`IMAGE_SIZE`] long; `records` at most
/// [`MAX_STUDENTS`] long.
pub fn encode_image(records: &[StudentRecord], image: &mut [u8]) -> usize {
    debug_assert!(records.len() <= MAX_STUDENTS);
    image[COUNT_OFFSET] = records.len() as u8;
    for (i, rec) in records.iter().enumerate() {
        let at = record_offset(i);
        image[at..at + RECORD_SIZE].copy_from_slice(&encode_record(rec));
    }
    record_offset(records.len())
}
