//! Run-to-completion roster reports: the on-screen list and the serial
//! transmit.
//!
//! Both walk [`RecordStore::present`], so records whose ID fails
//! validation are never shown or sent.  Neither reads the keypad.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::ports::{Beep, BuzzerPort, DisplayPort, EepromPort, SerialLinkPort};
use crate::app::screens::{self, NO_STUDENTS, SENDING, clock_time, id_line, line, time_line};
use crate::config::KioskConfig;
use crate::roster::RecordStore;

/// Show each present student for `list_dwell_ms`.  Returns the number shown.
///
/// An empty roster gets a short beep and the "No Students Present"
/// notice instead.
pub fn list_present<H, E>(hw: &mut H, store: &RecordStore<E>, cfg: &KioskConfig) -> usize
where
    H: DisplayPort + BuzzerPort + DelayNs,
    E: EepromPort,
{
    if store.is_empty() {
        screens::show(hw, NO_STUDENTS);
        hw.beep(Beep::Short);
        hw.delay_ms(cfg.empty_dwell_ms);
        return 0;
    }

    let mut shown = 0;
    for rec in store.present() {
        screens::show(
            hw,
            &[
                id_line("ID:", &rec.id),
                screens::Line::new(),
                line(format_args!("Time:{}", clock_time(rec))),
            ],
        );
        hw.delay_ms(cfg.list_dwell_ms);
        shown += 1;
    }
    shown
}

/// Send the present roster over the serial link, mirroring progress on
/// the display.  Returns the number of records sent.
///
/// ```text
/// === START ===
/// Students: N
/// ID:<id>
/// Time: hh:mm
/// ...
/// === END ===
/// ```
pub fn transmit<H, E>(hw: &mut H, store: &RecordStore<E>, cfg: &KioskConfig) -> usize
where
    H: DisplayPort + SerialLinkPort + DelayNs,
    E: EepromPort,
{
    let dwell = cfg.transmit_dwell_ms;

    screens::show(hw, SENDING);
    hw.delay_ms(dwell);

    hw.transmit_line("=== START ===");
    hw.delay_ms(dwell);

    let total = store.present().count();
    let header = line(format_args!("Students: {total}"));
    screens::show(hw, &[header.as_str()]);
    hw.transmit_line(&header);
    hw.delay_ms(dwell);

    for rec in store.present() {
        let time = time_line(rec);
        hw.transmit_line(&id_line("ID:", &rec.id));
        hw.transmit_line(&time);
        screens::show(hw, &[id_line("", &rec.id), time]);
        hw.delay_ms(dwell);
    }

    screens::show(
        hw,
        &[
            line(format_args!("Data Sent!")),
            line(format_args!("Records:")),
            line(format_args!("{total}")),
        ],
    );
    hw.transmit_line("=== END ===");
    hw.delay_ms(cfg.notice_dwell_ms);

    info!("Report: transmitted {} records", total);
    total
}
