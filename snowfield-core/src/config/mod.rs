//! Configuration module
//!
//! Display geometry, bus attachment descriptions and animation parameters.
//! Everything an instance needs is passed in explicitly; there is no
//! ambient global configuration.

pub mod display;
pub mod types;

pub use display::{Bus, DisplayAttachment, Geometry, I2cConfig, SpiConfig};
pub use types::*;

/// Errors detected while setting up an animation instance
///
/// Any of these leaves the instance un-started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// Width or height is zero
    EmptyGeometry,
    /// Width exceeds the terrain storage capacity
    TooManyColumns {
        /// Requested column count
        width: u16,
        /// Maximum supported column count
        max: u16,
    },
    /// Height does not fit the signed row coordinate space
    TooManyRows,
    /// Initial snow level is not within `0..=height-1`
    SnowLevelOutOfRange {
        /// Requested level
        level: i16,
        /// Highest allowed level
        max: i16,
    },
    /// Terrain reset below the baseline snow level
    SnowLevelBelowFloor {
        /// Requested level
        level: i16,
        /// Baseline snow level of the terrain
        floor: i16,
    },
    /// Spawn row range is empty (`min > max`)
    EmptySpawnRange,
}
