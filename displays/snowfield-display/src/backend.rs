//! Display bus interface trait
//!
//! Separates the SSD1306 command set from the transport it travels over.

/// Display driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Communication error on the bus
    Interface(E),
    /// Reset pin could not be driven
    ResetPin,
    /// Panel dimensions not supported by the controller
    UnsupportedGeometry,
}

/// Transport carrying commands and pixel data to the controller
///
/// Implementations decide how commands and data are told apart (control
/// byte on I2C, data/command pin on SPI).
#[allow(async_fn_in_trait)]
pub trait DisplayInterface {
    /// Error type for bus operations
    type Error;

    /// Send one or more command bytes
    async fn send_commands(&mut self, commands: &[u8]) -> Result<(), Self::Error>;

    /// Send display RAM data
    async fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}
