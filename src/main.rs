//! Rollcall Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  KioskHardwareAdapter   LogEventSink   NvsAdapter   TickClock  │
//! │  (Keypad+Display+       (EventSink)    (Config+     (ClockPort)│
//! │   Buzzer+Sensor+Serial)                 EEPROM)                │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              KioskService (pure logic)                 │    │
//! │  │  Menu · RecordStore · Workflows                        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  hw_timer (1 kHz) ──▶ SYSTEM_TICKS ──▶ TickClock               │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result, anyhow};
use embedded_hal::delay::DelayNs;
use log::{info, warn};

use rollcall::adapters::hardware::KioskHardwareAdapter;
use rollcall::adapters::log_sink::LogEventSink;
use rollcall::adapters::nvs::NvsAdapter;
use rollcall::adapters::time::TickClock;
use rollcall::app::ports::ConfigPort;
use rollcall::app::service::KioskService;
use rollcall::config::KioskConfig;
use rollcall::drivers::delay::SysDelay;
use rollcall::drivers::{hw_init, hw_timer, watchdog::Watchdog};
use rollcall::roster::RecordStore;

/// Pause between keypad polls.  Also lets the idle task run.
const POLL_INTERVAL_MS: u32 = 10;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Rollcall v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let nvs = NvsAdapter::new().context("NVS init")?;
    let config = match nvs.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            KioskConfig::default()
        }
    };

    // ── 3. Peripherals, tick, watchdog ────────────────────────
    hw_init::init_peripherals(config.serial_baud).context("peripheral init")?;
    if !hw_timer::start_tick_timer() {
        return Err(anyhow!("system tick unavailable"));
    }
    let watchdog = Watchdog::for_config(&config);

    // ── 4. Construct adapters and service ─────────────────────
    let mut hw = KioskHardwareAdapter::from_board();
    let mut log_sink = LogEventSink::new();
    let clock = TickClock::new();
    let mut idle = SysDelay::new();

    let mut kiosk = KioskService::new(config, RecordStore::new(nvs));
    kiosk.start(&mut hw, &mut log_sink);

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    loop {
        kiosk.poll(&clock, &mut hw, &mut log_sink);
        watchdog.feed();
        idle.delay_ms(POLL_INTERVAL_MS);
    }
}
