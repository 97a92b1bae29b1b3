//! Kiosk workflows as resumable sub-state machines.
//!
//! Each interactive workflow is advanced one routed key (or one empty
//! poll) at a time by the [`KioskService`](crate::app::service::KioskService)
//! and reports a step outcome instead of driving the display itself.
//! Nothing here sleeps, so every transition can be tested without real
//! time passing.
//!
//! | Workflow     | Input contract                   | Timeout |
//! |--------------|----------------------------------|---------|
//! | `enroll`     | digits, `*` backspace/exit, `#`  | yes     |
//! | `id_entry`   | same, `#` ignored until complete | no      |
//! | `monitor`    | `*` exits                        | no      |
//! | `report`     | none (runs to completion)        | no      |

pub mod buffer;
pub mod enroll;
pub mod id_entry;
pub mod monitor;
pub mod report;
