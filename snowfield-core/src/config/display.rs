//! Display geometry and bus attachment descriptions
//!
//! A [`DisplayAttachment`] replaces per-board `#if` blocks: each physical
//! panel is described by one value that is handed to the code that brings
//! it up.

use super::types::MAX_COLUMNS;
use super::SetupError;

/// Immutable pixel geometry of one display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    width: u16,
    height: u16,
}

impl Geometry {
    /// 128x64 panel
    pub const W128_H64: Self = Self {
        width: 128,
        height: 64,
    };

    /// 128x32 panel
    pub const W128_H32: Self = Self {
        width: 128,
        height: 32,
    };

    /// Create a validated geometry
    ///
    /// Both dimensions must be non-zero, the width must fit the terrain
    /// storage and the height must fit signed row coordinates.
    pub fn new(width: u16, height: u16) -> Result<Self, SetupError> {
        if width == 0 || height == 0 {
            return Err(SetupError::EmptyGeometry);
        }
        if width as usize > MAX_COLUMNS {
            return Err(SetupError::TooManyColumns {
                width,
                max: MAX_COLUMNS as u16,
            });
        }
        if height > i16::MAX as u16 {
            return Err(SetupError::TooManyRows);
        }
        Ok(Self { width, height })
    }

    /// Width in pixels (number of terrain columns)
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Index of the bottom row
    pub const fn bottom_row(&self) -> i16 {
        self.height as i16 - 1
    }

    /// Index of the right-most column
    pub const fn last_column(&self) -> i16 {
        self.width as i16 - 1
    }
}

/// I2C attachment parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// 7-bit device address
    pub address: u8,
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz) at the usual SSD1306 address
    pub const STANDARD: Self = Self {
        address: 0x3C,
        frequency: 100_000,
    };

    /// Fast mode (400 kHz) at the usual SSD1306 address
    pub const FAST: Self = Self {
        address: 0x3C,
        frequency: 400_000,
    };
}

/// SPI attachment parameters
///
/// Chip select and data/command lines are board pins and live with the
/// board description, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 1_000_000, // 1 MHz
        }
    }
}

/// Transport a display is attached through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bus {
    I2c(I2cConfig),
    Spi(SpiConfig),
}

/// Description of one physical display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayAttachment {
    /// Short label used in logs and demos
    pub label: &'static str,
    /// Pixel geometry
    pub geometry: Geometry,
    /// Transport
    pub bus: Bus,
    /// Whether a reset line is wired
    pub has_reset: bool,
    /// Contrast (0-255)
    pub contrast: u8,
    /// Mirror horizontally
    pub hflip: bool,
    /// Mirror vertically
    pub vflip: bool,
}

impl DisplayAttachment {
    /// 128x64 panel on I2C at 0x3C, no reset line
    pub const fn i2c_128x64(label: &'static str) -> Self {
        Self {
            label,
            geometry: Geometry::W128_H64,
            bus: Bus::I2c(I2cConfig::FAST),
            has_reset: false,
            contrast: 0xFF,
            hflip: false,
            vflip: false,
        }
    }

    /// 128x64 panel on SPI with a reset line
    pub const fn spi_128x64(label: &'static str) -> Self {
        Self {
            label,
            geometry: Geometry::W128_H64,
            bus: Bus::Spi(SpiConfig {
                frequency: 1_000_000,
            }),
            has_reset: true,
            contrast: 0xFF,
            hflip: false,
            vflip: false,
        }
    }

    /// I2C parameters, if attached over I2C
    pub fn i2c(&self) -> Option<I2cConfig> {
        match self.bus {
            Bus::I2c(config) => Some(config),
            Bus::Spi(_) => None,
        }
    }

    /// SPI parameters, if attached over SPI
    pub fn spi(&self) -> Option<SpiConfig> {
        match self.bus {
            Bus::Spi(config) => Some(config),
            Bus::I2c(_) => None,
        }
    }
}
