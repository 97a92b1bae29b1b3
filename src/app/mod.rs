//! Application core: kiosk logic behind port traits.
//!
//! This module contains the business rules for the Rollcall kiosk: menu
//! dispatch, workflow orchestration, and the notices each outcome shows.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod screens;
pub mod service;
