//! Menu screens, key handlers, and the table builder.
//!
//! Each menu is defined by its static screen lines and one plain `fn`
//! pointer, with no closures or heap.
//!
//! ```text
//!  MAIN ──1──▶ ATTENDANCE (enrollment)
//!   │   ──2──▶ STUDENT MGMT ──1──▶ (search)
//!   │                       ──2──▶ (list)
//!   │                       ──3──▶ (remove)
//!   │   ──3──▶ TEMP MONITOR
//!   │   ──4──▶ RETRIEVE DATA (transmit)
//!   │   ──5──▶ TRAFFIC
//!   ▲
//!   └──────────── * from any other menu
//! ```

use super::{Activity, MenuDescriptor, MenuState, Transition};
use crate::app::commands::Key;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static menu table.  Called once at startup.
pub fn build_menu_table() -> [MenuDescriptor; MenuState::COUNT] {
    [
        // Index 0: Main
        MenuDescriptor {
            id: MenuState::Main,
            name: "Main",
            screen: &[
                "1:Attendance",
                "2:Student Mgmt",
                "3:Temperature",
                "4:Retrieve Data",
                "5:Traffic Monitor",
            ],
            on_key: main_on_key,
        },
        // Index 1: Attendance
        MenuDescriptor {
            id: MenuState::Attendance,
            name: "Attendance",
            screen: &["Enter ID:", "*:Back #:Submit"],
            on_key: back_to_main,
        },
        // Index 2: StudentMgmt
        MenuDescriptor {
            id: MenuState::StudentMgmt,
            name: "StudentMgmt",
            screen: &["1:Search", "2:ViewPresent", "3:Remove Student", "*:Back"],
            on_key: student_mgmt_on_key,
        },
        // Index 3: ViewPresent.  No key enters it; the list runs modally
        // over StudentMgmt.
        MenuDescriptor {
            id: MenuState::ViewPresent,
            name: "ViewPresent",
            screen: &["Present Students"],
            on_key: back_to_main,
        },
        // Index 4: TempMonitor
        MenuDescriptor {
            id: MenuState::TempMonitor,
            name: "TempMonitor",
            screen: &["Temp Monitor..."],
            on_key: back_to_main,
        },
        // Index 5: RetrieveData
        MenuDescriptor {
            id: MenuState::RetrieveData,
            name: "RetrieveData",
            screen: &["Retrieving Data"],
            on_key: back_to_main,
        },
        // Index 6: Traffic
        MenuDescriptor {
            id: MenuState::Traffic,
            name: "Traffic",
            screen: &["Traffic Monitor..."],
            on_key: back_to_main,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Handlers
// ═══════════════════════════════════════════════════════════════════════════

fn main_on_key(key: Key) -> Option<Transition> {
    match key {
        Key::Digit(b'1') => Some(Transition::enter_and_run(
            MenuState::Attendance,
            Activity::Enrollment,
        )),
        Key::Digit(b'2') => Some(Transition::goto(MenuState::StudentMgmt)),
        Key::Digit(b'3') => Some(Transition::enter_and_run(
            MenuState::TempMonitor,
            Activity::Temperature,
        )),
        Key::Digit(b'4') => Some(Transition::enter_and_run(
            MenuState::RetrieveData,
            Activity::Transmit,
        )),
        Key::Digit(b'5') => Some(Transition::enter_and_run(
            MenuState::Traffic,
            Activity::Traffic,
        )),
        _ => None,
    }
}

fn student_mgmt_on_key(key: Key) -> Option<Transition> {
    match key {
        Key::Back => Some(Transition::goto(MenuState::Main)),
        Key::Digit(b'1') => Some(Transition::run(Activity::Search)),
        Key::Digit(b'2') => Some(Transition::run(Activity::ListPresent)),
        Key::Digit(b'3') => Some(Transition::run(Activity::Remove)),
        _ => None,
    }
}

/// Shared by every menu whose only exit is `*`.
fn back_to_main(key: Key) -> Option<Transition> {
    match key {
        Key::Back => Some(Transition::goto(MenuState::Main)),
        _ => None,
    }
}
