//! Mock hardware adapter for integration tests.
//!
//! Records every beep, serial line and dwell so tests can assert on the
//! full output history without touching GPIO.  Keys are scripted one per
//! poll.  Dwells advance a shared simulated clock instead of sleeping.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use rollcall::app::events::AppEvent;
use rollcall::app::ports::{
    Beep, BuzzerPort, ClockPort, DisplayPort, DistanceReading, EepromPort, EventSink, KeypadPort,
    SensorPort, SerialLinkPort, StorageError,
};
use rollcall::drivers::display::{DISPLAY_ROWS, FrameBuffer};
use rollcall::roster::layout::IMAGE_SIZE;

// ── Simulated clock ───────────────────────────────────────────

/// Milliseconds since boot, shared between the clock and the hardware
/// mock so dwells move time forward.
#[derive(Clone, Default)]
pub struct MockClock {
    millis: Rc<Cell<u64>>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_secs(&self, secs: u32) {
        self.millis.set(self.millis.get() + u64::from(secs) * 1000);
    }

    pub fn advance_ms(&self, ms: u32) {
        self.millis.set(self.millis.get() + u64::from(ms));
    }

    pub fn millis(&self) -> u64 {
        self.millis.get()
    }
}

impl ClockPort for MockClock {
    fn now_secs(&self) -> u32 {
        (self.millis.get() / 1000) as u32
    }
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// One entry consumed per `poll_key`; `None` means no key down.
    pub keys: VecDeque<Option<char>>,
    pub display: FrameBuffer,
    /// Every flushed frame, top row first, trailing blank rows dropped.
    pub frames: Vec<Vec<String>>,
    pub beeps: Vec<Beep>,
    pub serial: Vec<String>,
    pub dwell_ms: u64,
    pub temperature_raw: u16,
    /// One entry consumed per ranging cycle; empty means no obstacle.
    pub distances: VecDeque<DistanceReading>,
    clock: MockClock,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(clock: MockClock) -> Self {
        Self {
            keys: VecDeque::new(),
            display: FrameBuffer::new(),
            frames: Vec::new(),
            beeps: Vec::new(),
            serial: Vec::new(),
            dwell_ms: 0,
            temperature_raw: 0,
            distances: VecDeque::new(),
            clock,
        }
    }

    /// Queue a press followed by a release.
    pub fn tap(&mut self, key: char) {
        self.keys.push_back(Some(key));
        self.keys.push_back(None);
    }

    /// The rows currently on the panel.
    pub fn screen(&self) -> Vec<String> {
        Self::snapshot(&self.display)
    }

    /// Whether any frame flushed so far showed `needle`.
    pub fn ever_showed(&self, needle: &str) -> bool {
        self.frames
            .iter()
            .any(|f| f.iter().any(|row| row.contains(needle)))
    }

    pub fn clear_history(&mut self) {
        self.frames.clear();
        self.beeps.clear();
        self.serial.clear();
        self.dwell_ms = 0;
    }

    fn snapshot(fb: &FrameBuffer) -> Vec<String> {
        let mut rows: Vec<String> = (0..DISPLAY_ROWS)
            .map(|r| fb.row_text(r).to_string())
            .collect();
        while rows.last().is_some_and(String::is_empty) {
            rows.pop();
        }
        rows
    }
}

impl KeypadPort for MockHardware {
    fn poll_key(&mut self) -> Option<char> {
        self.keys.pop_front().flatten()
    }
}

impl DisplayPort for MockHardware {
    fn clear(&mut self) {
        self.display.clear();
    }

    fn move_cursor(&mut self, col: u8, row: u8) {
        self.display.move_cursor(col, row);
    }

    fn print(&mut self, text: &str) {
        self.display.print(text);
    }

    fn flush(&mut self) {
        self.display.flush();
        self.frames.push(Self::snapshot(&self.display));
    }
}

impl BuzzerPort for MockHardware {
    fn beep(&mut self, pattern: Beep) {
        self.beeps.push(pattern);
        self.clock
            .advance_ms(rollcall::drivers::buzzer::duration_ms(pattern));
    }
}

impl SensorPort for MockHardware {
    fn read_temperature_raw(&mut self) -> u16 {
        self.temperature_raw
    }

    fn measure_distance(&mut self) -> DistanceReading {
        self.distances
            .pop_front()
            .unwrap_or(DistanceReading::NoObstacle)
    }
}

impl SerialLinkPort for MockHardware {
    fn transmit_line(&mut self, line: &str) {
        self.serial.push(line.to_string());
    }
}

impl DelayNs for MockHardware {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns / 1000);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ms(us / 1000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.dwell_ms += u64::from(ms);
        self.clock.advance_ms(ms);
    }
}

// ── MemEeprom ─────────────────────────────────────────────────

/// Byte image that survives a simulated reboot: clones share storage.
#[derive(Clone)]
pub struct MemEeprom {
    image: Rc<RefCell<Option<Vec<u8>>>>,
    fail_writes: Rc<Cell<bool>>,
    pub writes: Rc<Cell<usize>>,
}

#[allow(dead_code)]
impl MemEeprom {
    /// Never written: reads report `NotFound`.
    pub fn blank() -> Self {
        Self {
            image: Rc::new(RefCell::new(None)),
            fail_writes: Rc::new(Cell::new(false)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    /// Start from raw bytes, padded with 0xFF.
    pub fn with_bytes(bytes: &[u8]) -> Self {
        let mut image = vec![0xFF; IMAGE_SIZE];
        image[..bytes.len()].copy_from_slice(bytes);
        let e = Self::blank();
        *e.image.borrow_mut() = Some(image);
        e
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn byte(&self, offset: usize) -> Option<u8> {
        self.image.borrow().as_ref().map(|i| i[offset])
    }

    pub fn bytes(&self, offset: usize, len: usize) -> Option<Vec<u8>> {
        self.image
            .borrow()
            .as_ref()
            .map(|i| i[offset..offset + len].to_vec())
    }
}

impl EepromPort for MemEeprom {
    fn read_bytes(&self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        let image = self.image.borrow();
        let image = image.as_ref().ok_or(StorageError::NotFound)?;
        let end = offset + buf.len();
        if end > image.len() {
            return Err(StorageError::OutOfBounds);
        }
        buf.copy_from_slice(&image[offset..end]);
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::IoError);
        }
        let end = offset + data.len();
        if end > IMAGE_SIZE {
            return Err(StorageError::OutOfBounds);
        }
        let mut image = self.image.borrow_mut();
        let image = image.get_or_insert_with(|| vec![0xFF; IMAGE_SIZE]);
        image[offset..end].copy_from_slice(data);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saw(&self, pred: impl Fn(&AppEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
