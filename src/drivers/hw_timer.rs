//! 1 kHz system tick using ESP-IDF's esp_timer API.
//!
//! The callback only calls [`SYSTEM_TICKS.on_tick`](crate::clock::TickCounter::on_tick).
//! It executes in the ESP timer task context (not ISR) and never blocks.
//! On simulation targets a detached thread approximates the tick with
//! `thread::sleep`.

use crate::clock::SYSTEM_TICKS;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::{error, info};

/// Tick period in microseconds.
pub const TICK_PERIOD_US: u64 = 1_000;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: TICK_TIMER is written once in `start_tick_timer()` before the
/// callback fires.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn tick_timer() -> esp_timer_handle_t {
    unsafe { TICK_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    SYSTEM_TICKS.on_tick();
}

/// Start the periodic tick.  Returns `false` if the timer could not be
/// created or started; the clock then stays at zero and enrollment never
/// times out, so callers should treat that as fatal.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer() -> bool {
    // SAFETY: TICK_TIMER is written here once at boot from the single
    // main-task context before the callback can fire.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"tick".as_ptr(),
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK {
            error!("hw_timer: tick timer create failed (rc={})", ret);
            return false;
        }
        let ret = esp_timer_start_periodic(tick_timer(), TICK_PERIOD_US);
        if ret != ESP_OK {
            error!("hw_timer: tick timer start failed (rc={})", ret);
            return false;
        }
    }
    info!("hw_timer: system tick @1kHz started");
    true
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer() -> bool {
    let spawned = std::thread::Builder::new()
        .name("tick".into())
        .spawn(|| {
            loop {
                std::thread::sleep(std::time::Duration::from_micros(TICK_PERIOD_US));
                SYSTEM_TICKS.on_tick();
            }
        });
    match spawned {
        Ok(_) => {
            log::info!("hw_timer(sim): tick thread started");
            true
        }
        Err(e) => {
            log::error!("hw_timer(sim): tick thread spawn failed: {}", e);
            false
        }
    }
}

/// Stop the tick.  The clock freezes at its current value.
#[cfg(target_os = "espidf")]
pub fn stop_tick_timer() {
    // SAFETY: tick_timer() contract; null-check covers a failed start.
    unsafe {
        let t = tick_timer();
        if !t.is_null() {
            esp_timer_stop(t);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_tick_timer() {}
