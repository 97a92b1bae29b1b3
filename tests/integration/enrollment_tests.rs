//! Enrollment through the keypad: Main → Attendance → commit or reject.

use rollcall::app::events::AppEvent;
use rollcall::app::ports::Beep;
use rollcall::error::KioskError;
use rollcall::fsm::{Activity, MenuState};
use rollcall::roster::MAX_STUDENTS;
use rollcall::workflow::enroll::AbortReason;

use crate::rig::{Rig, id, ids, record};

#[test]
fn boots_to_main_menu_with_startup_signal() {
    let rig = Rig::boot();
    assert_eq!(rig.kiosk.menu_state(), MenuState::Main);
    assert_eq!(rig.hw.beeps, vec![Beep::Startup]);
    assert_eq!(rig.hw.screen()[0], "1:Attendance");
    assert_eq!(
        rig.sink.events.last(),
        Some(&AppEvent::Started { records: 0 })
    );
}

#[test]
fn valid_id_is_recorded_and_persisted() {
    let mut rig = Rig::boot();
    rig.press("1");
    assert_eq!(rig.kiosk.menu_state(), MenuState::Attendance);
    assert_eq!(rig.kiosk.active_activity(), Some(Activity::Enrollment));

    rig.press("23001001");
    assert_eq!(rig.hw.screen()[1], "23001001");

    let now = rig.clock.millis() / 1000;
    rig.press("#");

    assert_eq!(rig.roster_ids(), vec!["23001001"]);
    let rec = rig.kiosk.store().find(&id("23001001")).expect("recorded");
    assert_eq!(u64::from(rec.timestamp), now);
    assert!(rig.hw.ever_showed("Recorded!"));
    assert_eq!(rig.hw.beeps.last(), Some(&Beep::Double));
    assert!(rig.sink.saw(|e| *e == AppEvent::AttendanceRecorded(rec)));

    // Count byte then the record bytes.
    let eeprom = rig.kiosk.store().eeprom();
    assert_eq!(eeprom.byte(0), Some(1));
    assert_eq!(eeprom.bytes(1, 8).as_deref(), Some(&b"23001001"[..]));

    // Session over, back on the Attendance menu.
    assert_eq!(rig.kiosk.active_activity(), None);
    assert_eq!(rig.kiosk.menu_state(), MenuState::Attendance);
}

#[test]
fn typed_digits_echo_with_cursor() {
    let mut rig = Rig::boot();
    rig.press("1230");
    assert_eq!(rig.hw.screen(), vec!["Enter ID:", "230_", "*:Back #:Submit"]);
}

#[test]
fn star_deletes_last_digit() {
    let mut rig = Rig::boot();
    rig.press("1");
    rig.press("2300100");
    rig.press("*");
    assert_eq!(rig.hw.screen()[1], "230010_");
    rig.press("01#");
    assert_eq!(rig.roster_ids(), vec!["23001001"]);
}

#[test]
fn ninth_digit_is_ignored() {
    let mut rig = Rig::boot();
    rig.press("1");
    rig.press("230010019");
    assert_eq!(rig.hw.screen()[1], "23001001");
    rig.press("#");
    assert_eq!(rig.roster_ids(), vec!["23001001"]);
}

#[test]
fn star_on_empty_entry_returns_to_main() {
    let mut rig = Rig::boot();
    rig.press("1*");
    assert_eq!(rig.kiosk.menu_state(), MenuState::Main);
    assert_eq!(rig.kiosk.active_activity(), None);
    assert!(rig.sink.saw(|e| *e == AppEvent::SessionAborted(AbortReason::Back)));
    assert!(rig.kiosk.store().is_empty());
}

#[test]
fn short_entry_is_rejected_and_collection_continues() {
    let mut rig = Rig::boot();
    rig.press("1");
    rig.press("2300100#");

    assert!(rig.hw.ever_showed("8 digits!"));
    assert_eq!(rig.hw.beeps.last(), Some(&Beep::Long));
    assert!(rig.sink.saw(|e| *e == AppEvent::EntryRejected(KioskError::IncompleteInput)));

    // Buffer cleared, still collecting.
    assert_eq!(rig.kiosk.active_activity(), Some(Activity::Enrollment));
    assert_eq!(rig.hw.screen()[1], "_");
    assert!(rig.kiosk.store().is_empty());

    rig.press("23001001#");
    assert_eq!(rig.roster_ids(), vec!["23001001"]);
}

#[test]
fn malformed_id_is_rejected() {
    let mut rig = Rig::boot();
    rig.press("1");
    rig.press("23000001#");
    assert!(rig.hw.ever_showed("Invalid ID"));
    assert!(rig.sink.saw(|e| *e == AppEvent::EntryRejected(KioskError::InvalidFormat)));
    assert!(rig.kiosk.store().is_empty());
}

#[test]
fn duplicate_is_rejected_without_touching_roster() {
    let mut rig = Rig::boot_with(&[record("23001001", 42)]);
    let writes = rig.kiosk.store().eeprom().writes.get();

    rig.enroll("23001001");

    assert!(rig.hw.ever_showed("Already"));
    assert!(rig.sink.saw(|e| *e == AppEvent::EntryRejected(KioskError::Duplicate)));
    assert_eq!(rig.roster_ids(), vec!["23001001"]);
    assert_eq!(rig.kiosk.store().records()[0].timestamp, 42);
    assert_eq!(rig.kiosk.store().eeprom().writes.get(), writes);
}

#[test]
fn full_roster_rejects_another_enrollment() {
    let seeded: Vec<_> = ids(MAX_STUDENTS)
        .iter()
        .map(|s| record(s, 1))
        .collect();
    let mut rig = Rig::boot_with(&seeded);
    assert!(rig.kiosk.store().is_full());

    rig.enroll("23002002");

    assert!(rig.hw.ever_showed("Maximum"));
    assert!(rig.sink.saw(|e| *e == AppEvent::EntryRejected(KioskError::CapacityExceeded)));
    assert_eq!(rig.kiosk.store().len(), MAX_STUDENTS);
    assert!(!rig.kiosk.store().contains(&id("23002002")));
}

#[test]
fn second_enrollment_starts_from_main_again() {
    let mut rig = Rig::boot();
    rig.enroll("23001001");
    rig.press("*");
    assert_eq!(rig.kiosk.menu_state(), MenuState::Main);
    rig.enroll("21005009");
    assert_eq!(rig.roster_ids(), vec!["23001001", "21005009"]);
}

// ── Timeout ───────────────────────────────────────────────────

#[test]
fn idle_session_times_out_before_a_late_submit() {
    let mut rig = Rig::boot();
    rig.press("1");
    rig.press("23001001");

    rig.clock.advance_secs(10);
    rig.press("#");

    assert!(rig.sink.saw(|e| *e == AppEvent::SessionAborted(AbortReason::Timeout)));
    assert!(rig.hw.ever_showed("Time Limit"));
    assert_eq!(rig.hw.beeps.last(), Some(&Beep::Long));
    assert_eq!(rig.kiosk.menu_state(), MenuState::Main);
    assert!(rig.kiosk.store().is_empty());
    assert!(!rig.sink.saw(|e| matches!(e, AppEvent::AttendanceRecorded(_))));
}

#[test]
fn timeout_fires_without_any_key() {
    let mut rig = Rig::boot();
    rig.press("1");
    rig.clock.advance_secs(10);
    rig.poll();
    assert_eq!(rig.kiosk.active_activity(), None);
    assert_eq!(rig.kiosk.menu_state(), MenuState::Main);
}

#[test]
fn session_survives_just_under_the_limit() {
    let mut rig = Rig::boot();
    rig.press("1");
    rig.clock.advance_secs(9);
    rig.poll();
    assert_eq!(rig.kiosk.active_activity(), Some(Activity::Enrollment));
}

#[test]
fn each_keypress_restarts_the_idle_window() {
    let mut rig = Rig::boot();
    rig.press("1");
    for digit in "23001001".chars() {
        rig.clock.advance_secs(9);
        rig.press(&digit.to_string());
    }
    assert_eq!(rig.kiosk.active_activity(), Some(Activity::Enrollment));

    let now = rig.clock.millis() / 1000;
    assert_eq!(rig.kiosk.session_remaining_secs(now as u32), Some(10));

    rig.press("#");
    assert_eq!(rig.roster_ids(), vec!["23001001"]);
}

#[test]
fn configured_timeout_is_honoured() {
    let mut config = rollcall::config::KioskConfig::default();
    config.entry_timeout_secs = 3;
    let mut rig = Rig::boot_on(crate::mock_hw::MemEeprom::blank(), config);
    rig.press("1");
    rig.clock.advance_secs(3);
    rig.poll();
    assert_eq!(rig.kiosk.active_activity(), None);
}

// ── Key handling ──────────────────────────────────────────────

#[test]
fn held_key_is_routed_once() {
    let mut rig = Rig::boot();
    rig.hw.keys.extend([Some('1'), Some('1'), Some('1'), None]);
    for _ in 0..4 {
        rig.poll();
    }
    // Launched enrollment, but the held '1' was not typed as a digit.
    assert_eq!(rig.kiosk.active_activity(), Some(Activity::Enrollment));
    assert_eq!(rig.hw.screen()[1], "_");
}

#[test]
fn changing_keys_without_release_counts_as_a_new_press() {
    let mut rig = Rig::boot();
    rig.hw.keys.extend([Some('1'), Some('2'), None]);
    for _ in 0..3 {
        rig.poll();
    }
    assert_eq!(rig.hw.screen()[1], "2_");
}

#[test]
fn main_menu_ignores_unbound_keys() {
    let mut rig = Rig::boot();
    rig.press("9#*0");
    assert_eq!(rig.kiosk.menu_state(), MenuState::Main);
    assert!(!rig.sink.saw(|e| matches!(e, AppEvent::MenuChanged { .. })));
}

#[test]
fn menu_changes_are_reported() {
    let mut rig = Rig::boot();
    rig.press("1");
    assert!(rig.sink.saw(|e| *e
        == AppEvent::MenuChanged {
            from: MenuState::Main,
            to: MenuState::Attendance,
        }));
}
