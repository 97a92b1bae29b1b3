//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that drives the kiosk through the
//! keypad against mock adapters.  All tests run on the host (x86_64) with
//! no real hardware required.

mod enrollment_tests;
mod lookup_tests;
mod mock_hw;
mod persistence_tests;
mod report_tests;
