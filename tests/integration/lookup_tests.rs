//! Search and Remove from the Student Management menu.

use rollcall::app::events::AppEvent;
use rollcall::app::screens::time_line;
use rollcall::fsm::{Activity, MenuState};

use crate::rig::{Rig, id, record};

#[test]
fn search_finds_enrolled_student_with_its_time() {
    let mut rig = Rig::boot();
    rig.clock.advance_secs(3600 + 5 * 60);
    rig.enroll("23001001");
    rig.press("*");
    let rec = rig.kiosk.store().find(&id("23001001")).expect("enrolled");

    rig.press("21");
    assert_eq!(rig.kiosk.active_activity(), Some(Activity::Search));
    rig.press("23001001#");

    assert!(rig.hw.ever_showed("Found:"));
    assert!(rig.hw.ever_showed(&time_line(&rec)));
    assert!(rig.hw.ever_showed("Time: 01:05"));
    assert!(rig.sink.saw(|e| *e == AppEvent::StudentFound(rec)));
    assert_eq!(rig.kiosk.menu_state(), MenuState::StudentMgmt);
    assert_eq!(rig.kiosk.active_activity(), None);
}

#[test]
fn search_miss_shows_no_record() {
    let mut rig = Rig::boot_with(&[record("23001001", 0)]);
    rig.press("21");
    rig.press("23009009#");
    assert!(rig.hw.ever_showed("No Record"));
    assert!(rig.sink.saw(|e| *e == AppEvent::LookupMissed(id("23009009"))));
    assert_eq!(rig.kiosk.menu_state(), MenuState::StudentMgmt);
}

#[test]
fn search_ignores_submit_until_complete() {
    let mut rig = Rig::boot();
    rig.press("21");
    rig.press("2300#");
    assert_eq!(rig.kiosk.active_activity(), Some(Activity::Search));
    assert_eq!(rig.hw.screen()[1], "2300_");
}

#[test]
fn search_star_backspaces_then_exits() {
    let mut rig = Rig::boot();
    rig.press("21");
    rig.press("23*");
    assert_eq!(rig.hw.screen()[1], "2_");
    rig.press("**");
    assert_eq!(rig.kiosk.active_activity(), None);
    assert_eq!(rig.kiosk.menu_state(), MenuState::StudentMgmt);
}

#[test]
fn search_has_no_time_limit() {
    let mut rig = Rig::boot();
    rig.press("21");
    rig.clock.advance_secs(600);
    rig.poll();
    assert_eq!(rig.kiosk.active_activity(), Some(Activity::Search));
}

#[test]
fn remove_deletes_and_persists() {
    let mut rig = Rig::boot();
    rig.enroll("23001001");
    rig.press("*");
    assert_eq!(rig.kiosk.store().eeprom().byte(0), Some(1));

    rig.press("23");
    assert_eq!(rig.kiosk.active_activity(), Some(Activity::Remove));
    assert_eq!(rig.hw.screen()[0], "Remove Student");
    rig.press("23001001#");

    assert!(rig.hw.ever_showed("Removed!"));
    assert!(rig.sink.saw(|e| matches!(e, AppEvent::StudentRemoved(r) if r.id == id("23001001"))));
    assert!(rig.kiosk.store().is_empty());
    assert_eq!(rig.kiosk.store().eeprom().byte(0), Some(0));
    assert_eq!(rig.kiosk.menu_state(), MenuState::StudentMgmt);
}

#[test]
fn remove_middle_keeps_order() {
    let mut rig = Rig::boot_with(&[
        record("23001001", 10),
        record("23001002", 20),
        record("23001003", 30),
    ]);
    rig.press("23");
    rig.press("23001002#");

    assert_eq!(rig.roster_ids(), vec!["23001001", "23001003"]);
    let eeprom = rig.kiosk.store().eeprom();
    assert_eq!(eeprom.byte(0), Some(2));
    assert_eq!(eeprom.bytes(13, 8).as_deref(), Some(&b"23001003"[..]));
    assert_eq!(eeprom.bytes(21, 4), Some(30u32.to_le_bytes().to_vec()));
}

#[test]
fn remove_miss_leaves_roster_alone() {
    let mut rig = Rig::boot_with(&[record("23001001", 0)]);
    let writes = rig.kiosk.store().eeprom().writes.get();
    rig.press("23");
    rig.press("23001002#");

    assert!(rig.hw.ever_showed("ID not found!"));
    assert_eq!(rig.roster_ids(), vec!["23001001"]);
    assert_eq!(rig.kiosk.store().eeprom().writes.get(), writes);
}

#[test]
fn remove_holds_its_notice_longer() {
    let mut rig = Rig::boot_with(&[record("23001001", 0)]);
    rig.press("23");
    rig.hw.clear_history();
    rig.press("23001001#");
    assert_eq!(rig.hw.dwell_ms, u64::from(rig.kiosk.config().remove_dwell_ms));
}

#[test]
fn student_menu_star_returns_to_main() {
    let mut rig = Rig::boot();
    rig.press("2*");
    assert_eq!(rig.kiosk.menu_state(), MenuState::Main);
}
