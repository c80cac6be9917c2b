//! Stop button
//!
//! A long press sets the shared stop flag. Short presses are ignored.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{with_timeout, Duration, Timer};

use crate::boards::STOP_LONG_PRESS_MS;
use crate::channels::STOP;

/// Button press task
#[embassy_executor::task]
pub async fn button_task(mut btn: Input<'static>) {
    info!("Button task started");

    loop {
        btn.wait_for_falling_edge().await;

        // Debounce
        Timer::after(Duration::from_millis(20)).await;
        if btn.is_high() {
            continue;
        }

        // Wait for release or long press timeout
        let released = with_timeout(
            Duration::from_millis(STOP_LONG_PRESS_MS),
            btn.wait_for_rising_edge(),
        )
        .await;

        match released {
            Ok(()) => {
                debug!("Button: short press ignored");
                // Debounce after release
                Timer::after(Duration::from_millis(50)).await;
            }
            Err(_) => {
                info!("Button: long press, stopping all displays");
                STOP.store(true, Ordering::Relaxed);
                return;
            }
        }
    }
}
