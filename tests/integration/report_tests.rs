//! View Present and Retrieve Data.

use rollcall::app::events::AppEvent;
use rollcall::app::ports::Beep;
use rollcall::fsm::MenuState;
use rollcall::roster::StudentId;

use crate::rig::{Rig, record};

#[test]
fn empty_list_beeps_and_returns() {
    let mut rig = Rig::boot();
    rig.hw.clear_history();
    rig.press("22");

    assert!(rig.hw.ever_showed("No Students Present"));
    assert_eq!(rig.hw.beeps, vec![Beep::Short]);
    assert_eq!(rig.kiosk.menu_state(), MenuState::StudentMgmt);
}

#[test]
fn list_runs_without_leaving_student_mgmt() {
    let mut rig = Rig::boot_with(&[record("23001001", 60)]);
    rig.press("2");
    rig.hw.clear_history();
    rig.press("2");

    assert!(rig.hw.ever_showed("ID:23001001"));
    assert!(!rig.hw.ever_showed("Present Students"));
    assert!(!rig.sink.saw(|e| matches!(
        e,
        AppEvent::MenuChanged { from: MenuState::ViewPresent, .. }
            | AppEvent::MenuChanged { to: MenuState::ViewPresent, .. }
    )));
    assert_eq!(rig.kiosk.menu_state(), MenuState::StudentMgmt);
}

#[test]
fn list_shows_each_present_student() {
    let mut rig = Rig::boot_with(&[record("23001001", 60), record("22010020", 3 * 3600)]);
    rig.hw.clear_history();
    rig.press("22");

    assert!(rig.hw.ever_showed("ID:23001001"));
    assert!(rig.hw.ever_showed("Time:00:01"));
    assert!(rig.hw.ever_showed("ID:22010020"));
    assert!(rig.hw.ever_showed("Time:03:00"));
    assert!(rig.hw.beeps.is_empty());
    assert_eq!(
        rig.hw.dwell_ms,
        2 * u64::from(rig.kiosk.config().list_dwell_ms)
    );
    assert_eq!(rig.kiosk.menu_state(), MenuState::StudentMgmt);
}

#[test]
fn list_skips_corrupted_slots() {
    let garbage = rollcall::roster::StudentRecord::new(StudentId::from_bytes(*b"9x9x9x9x"), 0);
    let mut rig = Rig::boot_with(&[garbage, record("23001001", 0)]);
    rig.press("22");
    assert!(rig.hw.ever_showed("ID:23001001"));
    assert!(!rig.hw.ever_showed("9x9x"));
}

#[test]
fn transmit_sends_framed_report() {
    let mut rig = Rig::boot_with(&[record("23001001", 65), record("21005009", 7200)]);
    rig.press("4");

    assert_eq!(
        rig.hw.serial,
        vec![
            "=== START ===",
            "Students: 2",
            "ID:23001001",
            "Time: 00:01",
            "ID:21005009",
            "Time: 02:00",
            "=== END ===",
        ]
    );
    assert!(rig.hw.ever_showed("Sending..."));
    assert!(rig.hw.ever_showed("Data Sent!"));
    assert!(rig.sink.saw(|e| *e == AppEvent::DataTransmitted { records: 2 }));
    assert_eq!(rig.kiosk.menu_state(), MenuState::Main);
}

#[test]
fn transmit_empty_roster_still_frames() {
    let mut rig = Rig::boot();
    rig.press("4");
    assert_eq!(
        rig.hw.serial,
        vec!["=== START ===", "Students: 0", "=== END ==="]
    );
    assert!(rig.sink.saw(|e| *e == AppEvent::DataTransmitted { records: 0 }));
}

#[test]
fn transmit_counts_only_valid_records() {
    let garbage = rollcall::roster::StudentRecord::new(StudentId::from_bytes([0xFF; 8]), 0);
    let mut rig = Rig::boot_with(&[record("23001001", 0), garbage]);
    rig.press("4");
    assert_eq!(rig.hw.serial[1], "Students: 1");
    assert_eq!(rig.hw.serial.len(), 5);
}

#[test]
fn transmit_reads_no_keys() {
    let mut rig = Rig::boot_with(&[record("23001001", 0)]);
    rig.hw.keys.extend([Some('4'), Some('1'), None]);
    rig.poll();
    // '1' is still queued: the report ran to completion inside one poll.
    assert_eq!(rig.hw.keys.front(), Some(&Some('1')));
    assert_eq!(rig.kiosk.menu_state(), MenuState::Main);
}
