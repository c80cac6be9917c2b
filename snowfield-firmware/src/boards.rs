//! Board wiring
//!
//! Raspberry Pi Pico with one I2C panel, up to four SPI panels sharing SPI1
//! and a stop button:
//!
//! | Signal      | GPIO  |
//! |-------------|-------|
//! | I2C0 SDA    | 4     |
//! | I2C0 SCL    | 5     |
//! | SPI1 SCK    | 10    |
//! | SPI1 MOSI   | 11    |
//! | SPI0 CS/DC  | 13/14 |
//! | SPI0 RST    | 15    |
//! | SPI1 CS/DC  | 17/20 |
//! | SPI2 CS/DC  | 18/21 |
//! | SPI3 CS/DC  | 19/22 |
//! | Stop button | 16    |
//!
//! Each SPI panel has its own chip select and data/command line. Only the
//! first one has a reset line wired.
//!
//! Pins are claimed in `main`; this module only describes the panels.

use snowfield_core::config::DisplayAttachment;

/// Number of panels on the shared SPI bus
pub const SPI_PANEL_COUNT: usize = 4;

/// Panel on I2C0 at 0x3C
pub const I2C_DISPLAY: DisplayAttachment = DisplayAttachment::i2c_128x64("I2C");

/// Panels on SPI1, in chip-select order
pub const SPI_DISPLAYS: [DisplayAttachment; SPI_PANEL_COUNT] = [
    DisplayAttachment::spi_128x64("SPI0"),
    without_reset(DisplayAttachment::spi_128x64("SPI1")),
    without_reset(DisplayAttachment::spi_128x64("SPI2")),
    without_reset(DisplayAttachment::spi_128x64("SPI3")),
];

/// Hold time for the stop button to count as a long press
pub const STOP_LONG_PRESS_MS: u64 = 1000;

const fn without_reset(mut attachment: DisplayAttachment) -> DisplayAttachment {
    attachment.has_reset = false;
    attachment
}
