//! Roster persistence across restarts, and the NVS-backed adapter.

use rollcall::adapters::nvs::NvsAdapter;
use rollcall::app::events::AppEvent;
use rollcall::app::ports::{ConfigError, ConfigPort, EepromPort};
use rollcall::config::KioskConfig;
use rollcall::error::KioskError;
use rollcall::fsm::Activity;

use crate::mock_hw::MemEeprom;
use crate::rig::{Rig, id, record, seeded};

#[test]
fn roster_survives_restart() {
    let eeprom = MemEeprom::blank();
    {
        let mut rig = Rig::boot_on(eeprom.clone(), KioskConfig::default());
        rig.enroll("23001001");
        rig.press("*");
        rig.enroll("20999999");
    }

    let rig = Rig::boot_on(eeprom, KioskConfig::default());
    assert!(rig.sink.saw(|e| *e == AppEvent::RosterLoaded { count: 2 }));
    assert!(rig.sink.saw(|e| *e == AppEvent::Started { records: 2 }));
    assert_eq!(rig.roster_ids(), vec!["23001001", "20999999"]);
}

#[test]
fn reload_keeps_timestamps_and_order() {
    let records = [
        record("23001001", 5),
        record("22002002", 4000),
        record("21003003", 90_000),
    ];
    let rig = Rig::boot_with(&records);
    assert_eq!(rig.kiosk.store().records(), &records[..]);
}

#[test]
fn corrupted_count_discards_roster() {
    let rig = Rig::boot_on(MemEeprom::with_bytes(&[21]), KioskConfig::default());
    assert!(rig.sink.saw(|e| *e == AppEvent::RosterCorrupted {
        error: KioskError::StoreCorrupted,
        stored_count: 21,
    }));
    assert!(rig.kiosk.store().is_empty());
}

#[test]
fn corrupted_roster_boots_silently_to_main() {
    let rig = Rig::boot_on(MemEeprom::with_bytes(&[42]), KioskConfig::default());
    assert!(rig.sink.saw(|e| matches!(
        e,
        AppEvent::RosterCorrupted { error: KioskError::StoreCorrupted, stored_count: 42 }
    )));
    assert!(rig.sink.saw(|e| *e == AppEvent::Started { records: 0 }));
    assert!(!rig.hw.ever_showed("Reset"));
    assert_eq!(rig.hw.screen()[0], "1:Attendance");
}

#[test]
fn erased_count_byte_is_corruption() {
    // A flash page that was erased but never written reads 0xFF.
    let rig = Rig::boot_on(MemEeprom::with_bytes(&[]), KioskConfig::default());
    assert!(rig.sink.saw(|e| *e == AppEvent::RosterCorrupted {
        error: KioskError::StoreCorrupted,
        stored_count: 0xFF,
    }));
    assert!(rig.kiosk.store().is_empty());
}

#[test]
fn enrollment_after_corruption_overwrites_image() {
    let eeprom = MemEeprom::with_bytes(&[200]);
    let mut rig = Rig::boot_on(eeprom.clone(), KioskConfig::default());
    rig.enroll("23001001");
    assert_eq!(eeprom.byte(0), Some(1));
}

#[test]
fn failed_write_keeps_in_memory_record() {
    let eeprom = MemEeprom::blank();
    eeprom.fail_writes(true);
    let mut rig = Rig::boot_on(eeprom.clone(), KioskConfig::default());
    rig.enroll("23001001");

    // Indistinguishable from success at the keypad.
    assert!(rig.hw.ever_showed("Recorded!"));
    assert!(rig.kiosk.store().contains(&id("23001001")));

    let rebooted = Rig::boot_on(eeprom, KioskConfig::default());
    assert!(rebooted.kiosk.store().is_empty());
}

#[test]
fn invalid_slot_is_blanked_on_next_save() {
    let garbage = rollcall::roster::StudentRecord::new(
        rollcall::roster::StudentId::from_bytes(*b"ABCDEFGH"),
        77,
    );
    let eeprom = seeded(&[garbage]);
    let mut rig = Rig::boot_on(eeprom.clone(), KioskConfig::default());
    rig.enroll("23001001");

    assert_eq!(eeprom.byte(0), Some(2));
    assert_eq!(eeprom.bytes(1, 12), Some(vec![0; 12]));
    assert_eq!(eeprom.bytes(13, 8).as_deref(), Some(&b"23001001"[..]));
}

// ── NVS adapter ───────────────────────────────────────────────

#[test]
fn kiosk_runs_on_nvs_backend() {
    let nvs = NvsAdapter::new().expect("sim NVS");
    let mut rig = Rig::boot_on(nvs, KioskConfig::default());
    assert!(rig.sink.saw(|e| *e == AppEvent::RosterLoaded { count: 0 }));

    rig.enroll("23001001");

    let mut count = [0u8; 1];
    rig.kiosk
        .store()
        .eeprom()
        .read_bytes(0, &mut count)
        .expect("written");
    assert_eq!(count[0], 1);
}

#[test]
fn stored_config_drives_the_session_limit() {
    let nvs = NvsAdapter::new().expect("sim NVS");
    let mut cfg = KioskConfig::default();
    cfg.entry_timeout_secs = 4;
    nvs.save(&cfg).expect("valid config");

    let loaded = nvs.load().expect("stored config");
    let mut rig = Rig::boot_on(MemEeprom::blank(), loaded);
    rig.press("1");
    rig.clock.advance_secs(4);
    rig.poll();
    assert_eq!(rig.kiosk.active_activity(), None);
}

#[test]
fn out_of_range_config_is_refused() {
    let nvs = NvsAdapter::new().expect("sim NVS");
    let mut cfg = KioskConfig::default();
    cfg.entry_timeout_secs = 0;
    assert!(matches!(
        nvs.save(&cfg),
        Err(ConfigError::ValidationFailed(_))
    ));
    assert_eq!(nvs.load(), Ok(KioskConfig::default()));
}

#[test]
fn search_sees_records_from_previous_run() {
    let eeprom = seeded(&[record("23001001", 120)]);
    let mut rig = Rig::boot_on(eeprom, KioskConfig::default());
    rig.press("21");
    rig.press("23001001#");
    assert!(rig.hw.ever_showed("Time: 00:02"));
    assert_eq!(rig.kiosk.active_activity(), None::<Activity>);
}
