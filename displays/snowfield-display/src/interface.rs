//! I2C and SPI display interfaces

use embedded_hal::digital::OutputPin;
use embedded_hal_async::i2c::I2c;
use embedded_hal_async::spi::SpiDevice;

use crate::backend::DisplayInterface;

/// Control byte: command stream follows
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: data stream follows
const CONTROL_DATA: u8 = 0x40;

/// Largest data payload sent in one I2C transaction
const I2C_CHUNK: usize = 128;

/// SSD1306 attached over I2C
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Wrap an I2C bus; `address` is the 7-bit device address (usually 0x3C)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> DisplayInterface for I2cInterface<I2C> {
    type Error = I2C::Error;

    async fn send_commands(&mut self, commands: &[u8]) -> Result<(), Self::Error> {
        for &cmd in commands {
            self.i2c.write(self.address, &[CONTROL_COMMAND, cmd]).await?;
        }
        Ok(())
    }

    async fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut buf = [0u8; I2C_CHUNK + 1];
        buf[0] = CONTROL_DATA;

        for chunk in data.chunks(I2C_CHUNK) {
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &buf[..=chunk.len()]).await?;
        }
        Ok(())
    }
}

/// Errors from the 4-wire SPI interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiInterfaceError<S, P> {
    /// SPI transfer failed
    Spi(S),
    /// Data/command pin could not be driven
    DataCommandPin(P),
}

/// SSD1306 attached over 4-wire SPI
///
/// Chip select is handled by the `SpiDevice`, so several panels can share
/// one bus through a bus-sharing device implementation.
pub struct SpiInterface<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiInterface<SPI, DC> {
    /// Wrap an SPI device and its data/command pin
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Give back the device and pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI: SpiDevice, DC: OutputPin> DisplayInterface for SpiInterface<SPI, DC> {
    type Error = SpiInterfaceError<SPI::Error, DC::Error>;

    async fn send_commands(&mut self, commands: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(SpiInterfaceError::DataCommandPin)?;
        self.spi.write(commands).await.map_err(SpiInterfaceError::Spi)
    }

    async fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(SpiInterfaceError::DataCommandPin)?;
        self.spi.write(data).await.map_err(SpiInterfaceError::Spi)
    }
}
