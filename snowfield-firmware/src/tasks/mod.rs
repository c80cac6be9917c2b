//! Embassy async tasks
//!
//! One task per attached display plus the stop button. Display tasks share
//! nothing but the stop flag and report back on `DISPLAY_DONE` when they end.

#[cfg(all(feature = "hello", feature = "fonts"))]
compile_error!("the `hello` and `fonts` demos are mutually exclusive");

pub mod button;
#[cfg(feature = "fonts")]
pub mod fonts;
#[cfg(feature = "hello")]
pub mod hello;
#[cfg(not(any(feature = "hello", feature = "fonts")))]
pub mod snowfield;

use core::fmt::Debug;

use embassy_rp::gpio::Output;
use snowfield_display::{DisplayInterface, Ssd1306};

use crate::channels::DISPLAY_DONE;
use crate::display::{I2cDisplay, SpiDisplay};

pub use button::button_task;

/// Run the selected demo on one panel, then report the task as done
#[cfg_attr(any(feature = "hello", feature = "fonts"), allow(unused_variables))]
async fn run_display<DI>(label: &'static str, index: usize, display: &mut Ssd1306<DI>)
where
    DI: DisplayInterface,
    DI::Error: Debug,
{
    #[cfg(not(any(feature = "hello", feature = "fonts")))]
    snowfield::animate(label, index, display).await;
    #[cfg(feature = "hello")]
    hello::greet(label, display).await;
    #[cfg(feature = "fonts")]
    fonts::cycle(label, display).await;

    DISPLAY_DONE.send(label).await;
}

/// Display task for the I2C panel
#[embassy_executor::task]
pub async fn i2c_display_task(mut display: I2cDisplay, label: &'static str, index: usize) {
    run_display(label, index, &mut display).await;
}

/// Display task for one panel on the shared SPI bus
///
/// Holds the reset line, if the panel has one, so it stays driven high
/// while the panel runs.
#[embassy_executor::task(pool_size = 4)]
pub async fn spi_display_task(
    mut display: SpiDisplay,
    _reset: Option<Output<'static>>,
    label: &'static str,
    index: usize,
) {
    run_display(label, index, &mut display).await;
}
