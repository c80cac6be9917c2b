//! Greeting counter demo
//!
//! Shows "<label>: <count>" centered on the panel, counting up at about
//! 60 Hz until the stop flag is set.

use core::fmt::Debug;
use core::sync::atomic::Ordering;

use defmt::*;
use embassy_time::Timer;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use snowfield_display::{draw_anchored, greeting, DisplayInterface, Ssd1306, TextAnchor};

use crate::channels::STOP;

/// Delay between counter updates
const FRAME_INTERVAL_MS: u64 = 16;

pub async fn greet<DI>(label: &'static str, display: &mut Ssd1306<DI>)
where
    DI: DisplayInterface,
    DI::Error: Debug,
{
    info!("{}: greeting started", label);

    let mut count: u32 = 0;
    loop {
        if STOP.load(Ordering::Relaxed) {
            display.fill(false);
            if let Err(e) = display.flush().await {
                warn!("{}: failed to blank display: {:?}", label, Debug2Format(&e));
            }
            info!("{}: stopped at {}", label, count);
            return;
        }

        display.fill(false);
        let line = greeting(label, count);
        // Drawing into the frame buffer cannot fail
        let _ = draw_anchored(display, &line, TextAnchor::Center, &FONT_6X10);

        if let Err(e) = display.flush().await {
            error!("{}: display error: {:?}", label, Debug2Format(&e));
            return;
        }
        trace!("{}: {}", label, count);

        count = count.wrapping_add(1);
        Timer::after_millis(FRAME_INTERVAL_MS).await;
    }
}
