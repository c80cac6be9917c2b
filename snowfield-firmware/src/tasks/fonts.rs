//! Font showcase demo
//!
//! Shows "Hello!" centered on the panel in each of the demo fonts for two
//! seconds, smallest first, then leaves the last frame up and ends.

use core::fmt::Debug;
use core::sync::atomic::Ordering;

use defmt::*;
use embassy_time::{Instant, Timer};
use snowfield_display::{
    draw_anchored, DisplayInterface, FontCycle, Ssd1306, TextAnchor, DEMO_FONTS,
};

use crate::channels::STOP;

/// How long each font stays up
const FONT_HOLD_MS: u64 = 2000;

/// Delay between redraws
const FRAME_INTERVAL_MS: u64 = 100;

const TEXT: &str = "Hello!";

pub async fn cycle<DI>(label: &'static str, display: &mut Ssd1306<DI>)
where
    DI: DisplayInterface,
    DI::Error: Debug,
{
    let fonts = FontCycle::new(DEMO_FONTS, FONT_HOLD_MS, Instant::now().as_millis());
    info!("{}: font showcase started, {} ms", label, fonts.duration_ms());

    let mut shown = None;
    while let Some((index, font)) = fonts.font_at(Instant::now().as_millis()) {
        if STOP.load(Ordering::Relaxed) {
            display.fill(false);
            if let Err(e) = display.flush().await {
                warn!("{}: failed to blank display: {:?}", label, Debug2Format(&e));
            }
            info!("{}: stopped at font {}", label, index);
            return;
        }

        if shown.is_some_and(|prev| prev != index) {
            debug!("{}: on to font {}", label, index);
        }
        shown = Some(index);

        display.fill(false);
        // Drawing into the frame buffer cannot fail
        let _ = draw_anchored(display, TEXT, TextAnchor::Center, font);

        if let Err(e) = display.flush().await {
            error!("{}: display error: {:?}", label, Debug2Format(&e));
            return;
        }

        Timer::after_millis(FRAME_INTERVAL_MS).await;
    }

    info!("{}: font showcase finished", label);
}
