//! Display bring-up
//!
//! Concrete panel types for this board and the shared init sequence.

use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, SPI1};
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use snowfield_core::config::DisplayAttachment;
use snowfield_display::{DisplayError, DisplayInterface, I2cInterface, SpiInterface, Ssd1306};

/// Panel on I2C0
pub type I2cDisplay = Ssd1306<I2cInterface<I2c<'static, I2C0, i2c::Async>>>;

/// SPI1, locked by whichever panel is transferring
pub type SharedSpiBus = Mutex<CriticalSectionRawMutex, Spi<'static, SPI1, spi::Async>>;

/// One panel's view of the shared bus, selected by its own chip select
pub type SpiPanelDevice =
    SpiDevice<'static, CriticalSectionRawMutex, Spi<'static, SPI1, spi::Async>, Output<'static>>;

/// Panel on the shared SPI1
pub type SpiDisplay = Ssd1306<SpiInterface<SpiPanelDevice, Output<'static>>>;

/// Reset (if wired), initialize and configure a panel
///
/// The panel is left blank and switched on.
pub async fn open<DI: DisplayInterface>(
    interface: DI,
    attachment: &DisplayAttachment,
    reset: Option<&mut Output<'static>>,
) -> Result<Ssd1306<DI>, DisplayError<DI::Error>> {
    let mut display = Ssd1306::new(interface, attachment.geometry)?;

    if let Some(rst) = reset {
        display.hard_reset(rst, &mut Delay).await?;
    }

    display.init().await?;
    display.set_contrast(attachment.contrast).await?;
    display.set_flip(attachment.hflip, attachment.vflip).await?;

    display.fill(false);
    display.flush().await?;

    Ok(display)
}
