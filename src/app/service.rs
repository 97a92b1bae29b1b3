//! Kiosk service: the hexagonal core.
//!
//! [`KioskService`] owns the menu navigator, the record store, and the
//! workflow currently holding the keypad.  All I/O flows through port
//! traits injected at call sites, so the whole service runs on the host
//! against mock adapters.
//!
//! ```text
//!  KeypadPort ──▶ ┌─────────────────────────────┐ ──▶ DisplayPort / BuzzerPort
//!  ClockPort  ──▶ │        KioskService          │ ──▶ SerialLinkPort
//!  SensorPort ──▶ │  Menu · RecordStore · Flow   │ ──▶ EventSink
//!                 └─────────────────────────────┘
//! ```
//!
//! The outer loop calls [`poll`](KioskService::poll) as fast as it likes.
//! A key that stays down is routed once; the next routed key needs a
//! release or a different key in between.

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::config::KioskConfig;
use crate::error::KioskError;
use crate::fsm::states::build_menu_table;
use crate::fsm::{Activity, MenuNavigator, MenuState};
use crate::roster::{LoadOutcome, RecordStore};
use crate::workflow::enroll::{AbortReason, EnrollSession, EnrollStep};
use crate::workflow::id_entry::{EntryStep, IdEntry};
use crate::workflow::monitor::{TemperatureReading, TrafficMonitor};
use crate::workflow::report;

use super::commands::Key;
use super::events::AppEvent;
use super::ports::{
    Beep, BuzzerPort, ClockPort, DisplayPort, EepromPort, EventSink, KioskHardware,
};
use super::screens::{self, ENROLL_TITLE, ENTRY_FOOTER, REMOVE_TITLE, SEARCH_TITLE};

/// The workflow holding the keypad between polls.
#[derive(Debug, Clone)]
enum Workflow {
    /// Keys go to the menu table.
    Idle,
    Enroll(EnrollSession),
    Search(IdEntry),
    Remove(IdEntry),
    Temperature,
    Traffic(TrafficMonitor),
}

// ───────────────────────────────────────────────────────────────
// KioskService
// ───────────────────────────────────────────────────────────────

pub struct KioskService<E> {
    menu: MenuNavigator,
    store: RecordStore<E>,
    config: KioskConfig,
    workflow: Workflow,
    /// Last raw key seen, for edge detection.
    last_key: Option<char>,
}

impl<E: EepromPort> KioskService<E> {
    /// Does **not** load the roster or draw anything; call
    /// [`start`](Self::start) next.
    pub fn new(config: KioskConfig, store: RecordStore<E>) -> Self {
        Self {
            menu: MenuNavigator::new(build_menu_table(), MenuState::Main),
            store,
            config,
            workflow: Workflow::Idle,
            last_key: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Load the persisted roster, play the startup signal, show Main.
    pub fn start(&mut self, hw: &mut impl KioskHardware, sink: &mut impl EventSink) {
        match self.store.load() {
            LoadOutcome::Loaded(count) => sink.emit(&AppEvent::RosterLoaded { count }),
            // No notice: the kiosk boots straight to Main on an empty roster.
            LoadOutcome::Corrupted { stored_count } => sink.emit(&AppEvent::RosterCorrupted {
                error: KioskError::StoreCorrupted,
                stored_count,
            }),
            LoadOutcome::Unreadable(e) => sink.emit(&AppEvent::RosterUnreadable(e)),
        }

        hw.beep(Beep::Startup);
        self.menu.start(hw);

        let records = self.store.len();
        sink.emit(&AppEvent::Started { records });
        info!("KioskService started with {} records", records);
    }

    // ── Per-poll orchestration ────────────────────────────────

    /// Read the keypad once and advance whatever holds it.
    ///
    /// An active enrollment is stepped even when no new key arrived, so
    /// its timeout fires on time.  Monitors refresh once per poll and
    /// block for their refresh interval.
    pub fn poll(
        &mut self,
        clock: &impl ClockPort,
        hw: &mut impl KioskHardware,
        sink: &mut impl EventSink,
    ) {
        let key = self.read_key(hw);

        let workflow = core::mem::replace(&mut self.workflow, Workflow::Idle);
        self.workflow = match workflow {
            Workflow::Idle => match key {
                Some(key) => self.route(key, clock, hw, sink),
                None => Workflow::Idle,
            },
            Workflow::Enroll(session) => {
                self.step_enroll(session, key, clock.now_secs(), hw, sink)
            }
            Workflow::Search(entry) => self.step_search(entry, key, hw, sink),
            Workflow::Remove(entry) => self.step_remove(entry, key, hw, sink),
            Workflow::Temperature => self.step_temperature(key, hw, sink),
            Workflow::Traffic(monitor) => self.step_traffic(monitor, key, hw, sink),
        };
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn menu_state(&self) -> MenuState {
        self.menu.current()
    }

    pub fn store(&self) -> &RecordStore<E> {
        &self.store
    }

    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    /// The workflow holding the keypad, or `None` when keys go to the menu.
    pub fn active_activity(&self) -> Option<Activity> {
        match self.workflow {
            Workflow::Idle => None,
            Workflow::Enroll(_) => Some(Activity::Enrollment),
            Workflow::Search(_) => Some(Activity::Search),
            Workflow::Remove(_) => Some(Activity::Remove),
            Workflow::Temperature => Some(Activity::Temperature),
            Workflow::Traffic(_) => Some(Activity::Traffic),
        }
    }

    /// Seconds before the open enrollment session times out.
    pub fn session_remaining_secs(&self, now_secs: u32) -> Option<u32> {
        match &self.workflow {
            Workflow::Enroll(s) => Some(s.remaining_secs(now_secs)),
            _ => None,
        }
    }

    // ── Input ─────────────────────────────────────────────────

    fn read_key(&mut self, hw: &mut impl KioskHardware) -> Option<Key> {
        let raw = hw.poll_key();
        let fresh = match raw {
            Some(c) if self.last_key != Some(c) => Some(c),
            _ => None,
        };
        self.last_key = raw;

        let c = fresh?;
        let key = Key::from_char(c);
        if key.is_none() {
            debug!("Ignoring unmapped key {:?}", c);
        }
        key
    }

    // ── Menu ──────────────────────────────────────────────────

    fn route(
        &mut self,
        key: Key,
        clock: &impl ClockPort,
        hw: &mut impl KioskHardware,
        sink: &mut impl EventSink,
    ) -> Workflow {
        let from = self.menu.current();
        let activity = self.menu.handle_key(key, hw);
        let to = self.menu.current();
        if from != to {
            sink.emit(&AppEvent::MenuChanged { from, to });
        }

        match activity {
            Some(activity) => self.launch(activity, clock, hw, sink),
            None => Workflow::Idle,
        }
    }

    fn go_to(&mut self, to: MenuState, hw: &mut impl DisplayPort, sink: &mut impl EventSink) {
        let from = self.menu.current();
        self.menu.go_to(to, hw);
        if from != to {
            sink.emit(&AppEvent::MenuChanged { from, to });
        }
    }

    fn launch(
        &mut self,
        activity: Activity,
        clock: &impl ClockPort,
        hw: &mut impl KioskHardware,
        sink: &mut impl EventSink,
    ) -> Workflow {
        debug!("Launching {:?}", activity);
        match activity {
            Activity::Enrollment => {
                let session = EnrollSession::new(clock.now_secs(), self.config.entry_timeout_secs);
                screens::entry_prompt(hw, ENROLL_TITLE, session.typed(), Some(ENTRY_FOOTER));
                Workflow::Enroll(session)
            }
            Activity::Search => {
                screens::entry_prompt(hw, SEARCH_TITLE, "", Some(ENTRY_FOOTER));
                Workflow::Search(IdEntry::new())
            }
            Activity::Remove => {
                screens::entry_prompt(hw, REMOVE_TITLE, "", Some(ENTRY_FOOTER));
                Workflow::Remove(IdEntry::new())
            }
            Activity::ListPresent => {
                report::list_present(hw, &self.store, &self.config);
                self.go_to(MenuState::StudentMgmt, hw, sink);
                Workflow::Idle
            }
            Activity::Transmit => {
                let records = report::transmit(hw, &self.store, &self.config);
                sink.emit(&AppEvent::DataTransmitted { records });
                self.go_to(MenuState::Main, hw, sink);
                Workflow::Idle
            }
            Activity::Temperature => self.step_temperature(None, hw, sink),
            Activity::Traffic => {
                let monitor = TrafficMonitor::new(self.config.traffic_count_threshold_cm);
                self.step_traffic(monitor, None, hw, sink)
            }
        }
    }

    // ── Enrollment ────────────────────────────────────────────

    fn step_enroll(
        &mut self,
        mut session: EnrollSession,
        key: Option<Key>,
        now_secs: u32,
        hw: &mut impl KioskHardware,
        sink: &mut impl EventSink,
    ) -> Workflow {
        match session.step(key, now_secs, &mut self.store) {
            EnrollStep::Continue => {
                if key.is_some() {
                    screens::entry_prompt(hw, ENROLL_TITLE, session.typed(), Some(ENTRY_FOOTER));
                }
                Workflow::Enroll(session)
            }
            EnrollStep::Rejected(err) => {
                sink.emit(&AppEvent::EntryRejected(err));
                self.notify(hw, screens::rejection(err), Beep::Long, self.config.notice_dwell_ms);
                screens::entry_prompt(hw, ENROLL_TITLE, session.typed(), Some(ENTRY_FOOTER));
                Workflow::Enroll(session)
            }
            EnrollStep::Recorded(record) => {
                sink.emit(&AppEvent::AttendanceRecorded(record));
                self.notify(hw, screens::RECORDED, Beep::Double, self.config.notice_dwell_ms);
                self.go_to(MenuState::Attendance, hw, sink);
                Workflow::Idle
            }
            EnrollStep::Aborted(reason) => {
                sink.emit(&AppEvent::SessionAborted(reason));
                if reason == AbortReason::Timeout {
                    let notice = screens::rejection(KioskError::Timeout);
                    self.notify(hw, notice, Beep::Long, self.config.notice_dwell_ms);
                }
                self.go_to(MenuState::Main, hw, sink);
                Workflow::Idle
            }
        }
    }

    // ── Lookups ───────────────────────────────────────────────

    fn step_search(
        &mut self,
        mut entry: IdEntry,
        key: Option<Key>,
        hw: &mut impl KioskHardware,
        sink: &mut impl EventSink,
    ) -> Workflow {
        let Some(key) = key else {
            return Workflow::Search(entry);
        };
        match entry.step(key) {
            EntryStep::Continue => {
                screens::entry_prompt(hw, SEARCH_TITLE, entry.typed(), Some(ENTRY_FOOTER));
                Workflow::Search(entry)
            }
            EntryStep::Cancelled => {
                self.go_to(MenuState::StudentMgmt, hw, sink);
                Workflow::Idle
            }
            EntryStep::Submitted(id) => {
                match self.store.find(&id) {
                    Some(record) => {
                        sink.emit(&AppEvent::StudentFound(record));
                        screens::show(
                            hw,
                            &[
                                screens::line(format_args!("Found:")),
                                screens::id_line("", &record.id),
                                screens::time_line(&record),
                            ],
                        );
                    }
                    None => {
                        sink.emit(&AppEvent::LookupMissed(id));
                        screens::show(hw, screens::SEARCH_MISSED);
                    }
                }
                hw.delay_ms(self.config.notice_dwell_ms);
                self.go_to(MenuState::StudentMgmt, hw, sink);
                Workflow::Idle
            }
        }
    }

    fn step_remove(
        &mut self,
        mut entry: IdEntry,
        key: Option<Key>,
        hw: &mut impl KioskHardware,
        sink: &mut impl EventSink,
    ) -> Workflow {
        let Some(key) = key else {
            return Workflow::Remove(entry);
        };
        match entry.step(key) {
            EntryStep::Continue => {
                screens::entry_prompt(hw, REMOVE_TITLE, entry.typed(), Some(ENTRY_FOOTER));
                Workflow::Remove(entry)
            }
            EntryStep::Cancelled => {
                self.go_to(MenuState::StudentMgmt, hw, sink);
                Workflow::Idle
            }
            EntryStep::Submitted(id) => {
                match self.store.remove(&id) {
                    Ok(record) => {
                        sink.emit(&AppEvent::StudentRemoved(record));
                        screens::show(hw, screens::REMOVED);
                    }
                    Err(_) => {
                        sink.emit(&AppEvent::LookupMissed(id));
                        screens::show(hw, screens::REMOVE_MISSED);
                    }
                }
                hw.delay_ms(self.config.remove_dwell_ms);
                self.go_to(MenuState::StudentMgmt, hw, sink);
                Workflow::Idle
            }
        }
    }

    // ── Monitors ──────────────────────────────────────────────

    fn step_temperature(
        &mut self,
        key: Option<Key>,
        hw: &mut impl KioskHardware,
        sink: &mut impl EventSink,
    ) -> Workflow {
        if key == Some(Key::Back) {
            self.go_to(MenuState::Main, hw, sink);
            return Workflow::Idle;
        }
        let reading = TemperatureReading::from_raw(hw.read_temperature_raw());
        screens::show(hw, &reading.screen());
        hw.delay_ms(self.config.temp_refresh_ms);
        Workflow::Temperature
    }

    fn step_traffic(
        &mut self,
        mut monitor: TrafficMonitor,
        key: Option<Key>,
        hw: &mut impl KioskHardware,
        sink: &mut impl EventSink,
    ) -> Workflow {
        if key == Some(Key::Back) {
            self.go_to(MenuState::Main, hw, sink);
            return Workflow::Idle;
        }
        let reading = hw.measure_distance();
        if monitor.observe(reading) {
            hw.beep(Beep::Short);
            sink.emit(&AppEvent::TrafficCounted {
                total: monitor.count(),
            });
        }
        screens::show(hw, &monitor.screen(reading));
        hw.delay_ms(self.config.traffic_refresh_ms);
        Workflow::Traffic(monitor)
    }

    // ── Internal ──────────────────────────────────────────────

    /// Show a notice, sound its cue, and hold it for `dwell_ms`.
    fn notify<H: DisplayPort + BuzzerPort + DelayNs>(
        &self,
        hw: &mut H,
        lines: &[&str],
        beep: Beep,
        dwell_ms: u32,
    ) {
        screens::show(hw, lines);
        hw.beep(beep);
        hw.delay_ms(dwell_ms);
    }
}
