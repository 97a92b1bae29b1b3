//! Menu Navigator: function-pointer menu state machine.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  MenuTable                                               │
//! │  ┌──────────────┬─────────────────┬──────────────────┐   │
//! │  │ MenuState    │ screen          │ on_key           │   │
//! │  ├──────────────┼─────────────────┼──────────────────┤   │
//! │  │ Main         │ &[&str]         │ fn(Key)->Option<>│   │
//! │  │ Attendance   │ &[&str]         │ fn(Key)->Option<>│   │
//! │  │ StudentMgmt  │ &[&str]         │ fn(Key)->Option<>│   │
//! │  │ …            │                 │                  │   │
//! │  └──────────────┴─────────────────┴──────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each routed key goes to `on_key` for the **current** menu.  A returned
//! [`Transition`] may name a new menu, an [`Activity`] to start, or both.
//! The navigator only switches menus and renders screens; running the
//! activity is the [`KioskService`](crate::app::service::KioskService)'s
//! job.

pub mod states;

use log::info;

use crate::app::commands::Key;
use crate::app::ports::DisplayPort;

// ---------------------------------------------------------------------------
// Menu identity
// ---------------------------------------------------------------------------

/// Every menu the kiosk can show.
/// Must stay in sync with the table built in [`states::build_menu_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MenuState {
    Main = 0,
    Attendance = 1,
    StudentMgmt = 2,
    ViewPresent = 3,
    TempMonitor = 4,
    RetrieveData = 5,
    Traffic = 6,
}

impl MenuState {
    /// Total number of menus, used to size the table array.
    pub const COUNT: usize = 7;

    /// Convert a table index back to `MenuState`.  Panics on out-of-range
    /// in debug builds; returns `Main` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Main,
            1 => Self::Attendance,
            2 => Self::StudentMgmt,
            3 => Self::ViewPresent,
            4 => Self::TempMonitor,
            5 => Self::RetrieveData,
            6 => Self::Traffic,
            _ => {
                debug_assert!(false, "invalid menu index: {idx}");
                Self::Main
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Modal activity a menu key can launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Enrollment,
    Search,
    ListPresent,
    Remove,
    Temperature,
    Transmit,
    Traffic,
}

/// Result of a key handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Menu to enter (and render) before `run` starts.
    pub to: Option<MenuState>,
    /// Activity to start once the menu is shown.
    pub run: Option<Activity>,
}

impl Transition {
    pub const fn goto(to: MenuState) -> Self {
        Self { to: Some(to), run: None }
    }

    pub const fn enter_and_run(to: MenuState, run: Activity) -> Self {
        Self { to: Some(to), run: Some(run) }
    }

    /// Launch an activity without leaving the current menu.
    pub const fn run(run: Activity) -> Self {
        Self { to: None, run: Some(run) }
    }
}

/// Signature for the per-key handler.
/// Returns `None` when the key means nothing in this menu.
pub type KeyHandlerFn = fn(Key) -> Option<Transition>;

// ---------------------------------------------------------------------------
// Menu descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single menu.
/// Stored in a fixed-size array without heap or `dyn`.
pub struct MenuDescriptor {
    pub id: MenuState,
    pub name: &'static str,
    /// Lines drawn top-down from row 0 when the menu is entered.
    pub screen: &'static [&'static str],
    pub on_key: KeyHandlerFn,
}

// ---------------------------------------------------------------------------
// Navigator engine
// ---------------------------------------------------------------------------

pub struct MenuNavigator {
    /// Fixed-size table indexed by `MenuState as usize`.
    table: [MenuDescriptor; MenuState::COUNT],
    current: usize,
}

impl MenuNavigator {
    pub fn new(table: [MenuDescriptor; MenuState::COUNT], initial: MenuState) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Render the initial menu.  Call once before the first key.
    pub fn start(&mut self, display: &mut impl DisplayPort) {
        info!("Menu starting in: {}", self.table[self.current].name);
        self.render(display);
    }

    /// Route one key through the current menu's handler.
    ///
    /// On a menu change the new screen is rendered before returning, so a
    /// launched activity always starts on top of its own menu.  Returns the
    /// activity to run, if any.
    pub fn handle_key(&mut self, key: Key, display: &mut impl DisplayPort) -> Option<Activity> {
        let transition = (self.table[self.current].on_key)(key)?;
        if let Some(to) = transition.to {
            self.go_to(to, display);
        }
        transition.run
    }

    /// Switch menus and render, regardless of what any handler says.
    pub fn go_to(&mut self, next: MenuState, display: &mut impl DisplayPort) {
        let next_idx = next as usize;
        if next_idx != self.current {
            info!(
                "Menu transition: {} -> {}",
                self.table[self.current].name, self.table[next_idx].name
            );
            self.current = next_idx;
        }
        self.render(display);
    }

    pub fn current(&self) -> MenuState {
        MenuState::from_index(self.current)
    }

    pub fn current_name(&self) -> &'static str {
        self.table[self.current].name
    }

    /// Redraw the current menu's screen.
    pub fn render(&self, display: &mut impl DisplayPort) {
        display.clear();
        for (row, line) in self.table[self.current].screen.iter().enumerate() {
            display.move_cursor(0, row as u8);
            display.print(line);
        }
        display.flush();
    }
}
