//! Task Watchdog Timer (TWDT) driver.
//!
//! The kiosk runs its report and list screens to completion inside one
//! poll, so the main task can legitimately go quiet for as long as a
//! full-roster transmit takes.  The timeout is sized from the active
//! [`KioskConfig`] rather than fixed: longer dwells stretch it, and it
//! never drops below [`MIN_TIMEOUT_MS`].

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::warn;
use log::info;

use crate::app::ports::Beep;
use crate::config::KioskConfig;
use crate::drivers::buzzer::duration_ms;
use crate::roster::MAX_STUDENTS;

/// Floor for the timeout, whatever the configured dwells.
pub const MIN_TIMEOUT_MS: u32 = 10_000;

/// Added on top of the longest stall.
const HEADROOM_MS: u32 = 5_000;

/// Longest a single poll can block: a transmit of a full roster, which
/// dwells on "Sending...", the start marker, the header and each record,
/// then holds the "Data Sent!" notice.
pub fn longest_stall_ms(cfg: &KioskConfig) -> u32 {
    let transmit = cfg
        .transmit_dwell_ms
        .saturating_mul(3 + MAX_STUDENTS as u32)
        .saturating_add(cfg.notice_dwell_ms);
    let list = cfg.list_dwell_ms.saturating_mul(MAX_STUDENTS as u32);
    let monitor = cfg.temp_refresh_ms.max(cfg.traffic_refresh_ms);
    transmit.max(list).max(monitor).max(cfg.remove_dwell_ms)
}

/// Timeout to arm for `cfg`.
pub fn timeout_for(cfg: &KioskConfig) -> u32 {
    longest_stall_ms(cfg)
        .saturating_add(duration_ms(Beep::Long))
        .saturating_add(HEADROOM_MS)
        .max(MIN_TIMEOUT_MS)
}

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Arm the TWDT for `cfg` and subscribe the calling task.
    pub fn for_config(cfg: &KioskConfig) -> Self {
        Self::new(timeout_for(cfg))
    }

    /// Arm the TWDT with `timeout_ms` and subscribe the calling task.
    /// A failed subscription leaves [`feed`](Self::feed) a no-op.
    pub fn new(timeout_ms: u32) -> Self {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: reconfigure/add are called once from the main task.
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    warn!("TWDT reconfigure returned {} (may already be configured)", ret);
                }

                let ret = esp_task_wdt_add(core::ptr::null_mut());
                let subscribed = ret == ESP_OK;
                if subscribed {
                    info!("Watchdog: armed at {} ms, panic on trigger", timeout_ms);
                } else {
                    warn!("Watchdog: failed to subscribe ({})", ret);
                }

                Self { timeout_ms, subscribed }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("Watchdog(sim): {} ms, never fires", timeout_ms);
            Self { timeout_ms }
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Call once per poll.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: resets the TWDT entry of the subscribed main task.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
