//! Snowfield - snowy field animation firmware
//!
//! Main firmware binary for RP2040 boards driving one or more SSD1306
//! OLED panels, one on I2C0 and up to four sharing SPI1. Every panel that
//! comes up gets its own animation task; a long press on the stop button
//! blanks them all.

#![no_std]
#![no_main]

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::spi::{self, Spi};
use embassy_sync::mutex::Mutex;
use snowfield_core::config::SpiConfig;
use snowfield_display::{I2cInterface, SpiInterface};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::channels::DISPLAY_DONE;
use crate::display::SharedSpiBus;

mod boards;
mod channels;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

static SPI_BUS: StaticCell<SharedSpiBus> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Snowfield firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let mut running: usize = 0;

    // I2C panel (SCL=GPIO5, SDA=GPIO4)
    let attachment = boards::I2C_DISPLAY;
    let bus = attachment.i2c().unwrap_or_default();
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = bus.frequency;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);

    match display::open(I2cInterface::new(i2c, bus.address), &attachment, None).await {
        Ok(panel) => {
            info!("{}: display initialized", attachment.label);
            spawner
                .spawn(tasks::i2c_display_task(panel, attachment.label, running))
                .unwrap();
            running += 1;
        }
        Err(e) => error!(
            "{}: display init failed: {:?}",
            attachment.label,
            Debug2Format(&e)
        ),
    }

    // SPI panels sharing SPI1 (SCK=GPIO10, MOSI=GPIO11), clocked for the
    // slowest one
    let frequency = boards::SPI_DISPLAYS
        .iter()
        .filter_map(|attachment| attachment.spi())
        .map(|bus| bus.frequency)
        .min()
        .unwrap_or(SpiConfig::default().frequency);
    let mut spi_config = spi::Config::default();
    spi_config.frequency = frequency;
    let spi = Spi::new_txonly(p.SPI1, p.PIN_10, p.PIN_11, p.DMA_CH0, spi_config);
    let spi_bus: &'static SharedSpiBus = SPI_BUS.init(Mutex::new(spi));

    // (CS, DC) per panel, in the order of `boards::SPI_DISPLAYS`
    let panel_pins = [
        (Output::new(p.PIN_13, Level::High), Output::new(p.PIN_14, Level::Low)),
        (Output::new(p.PIN_17, Level::High), Output::new(p.PIN_20, Level::Low)),
        (Output::new(p.PIN_18, Level::High), Output::new(p.PIN_21, Level::Low)),
        (Output::new(p.PIN_19, Level::High), Output::new(p.PIN_22, Level::Low)),
    ];
    let mut spi_reset = Some(Output::new(p.PIN_15, Level::High));

    for (attachment, (cs, dc)) in boards::SPI_DISPLAYS.iter().zip(panel_pins) {
        let mut reset = if attachment.has_reset {
            spi_reset.take()
        } else {
            None
        };
        let interface = SpiInterface::new(SpiDevice::new(spi_bus, cs), dc);

        match display::open(interface, attachment, reset.as_mut()).await {
            Ok(panel) => {
                info!("{}: display initialized", attachment.label);
                spawner
                    .spawn(tasks::spi_display_task(panel, reset, attachment.label, running))
                    .unwrap();
                running += 1;
            }
            Err(e) => error!(
                "{}: display init failed: {:?}",
                attachment.label,
                Debug2Format(&e)
            ),
        }
    }

    if running == 0 {
        warn!("No display came up, nothing to do");
        return;
    }

    // Stop button (GPIO16, active low)
    let stop_button = Input::new(p.PIN_16, Pull::Up);
    spawner.spawn(tasks::button_task(stop_button)).unwrap();

    info!("{} display task(s) spawned, firmware running", running);

    for _ in 0..running {
        let label = DISPLAY_DONE.receive().await;
        info!("{}: display task ended", label);
    }

    info!("All displays stopped");
}
