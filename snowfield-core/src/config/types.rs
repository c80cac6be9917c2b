//! Animation parameter types

use super::display::Geometry;
use super::SetupError;

/// Capacity of the particle pool
pub const MAX_SNOWFLAKES: usize = 128;

/// Maximum number of terrain columns (display width)
pub const MAX_COLUMNS: usize = 256;

/// Snowflakes requested per spawn
pub const NEW_SNOWFLAKES_COUNT: u8 = 3;

/// Milliseconds between spawns
pub const NEW_SNOWFLAKES_DELAY_MS: u64 = 250;

/// Baseline snow height, also the lower clamp of every column
pub const DEFAULT_SNOW_LEVEL: i16 = 10;

/// Frame interval in milliseconds (~30 fps)
pub const FRAME_INTERVAL_MS: u32 = 33;

/// Animation parameters for one instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SnowfieldConfig {
    /// Snowflakes requested each time the spawn timer fires
    pub new_snowflakes_count: u8,
    /// Milliseconds between spawns
    pub new_snowflakes_delay_ms: u64,
    /// Initial terrain height and lower clamp bound
    pub default_snow_level: i16,
    /// Lowest spawn row (may be above the screen)
    pub spawn_row_min: i16,
    /// Highest spawn row
    pub spawn_row_max: i16,
    /// Delay between frames in milliseconds
    pub frame_interval_ms: u32,
}

impl Default for SnowfieldConfig {
    fn default() -> Self {
        Self {
            new_snowflakes_count: NEW_SNOWFLAKES_COUNT,
            new_snowflakes_delay_ms: NEW_SNOWFLAKES_DELAY_MS,
            default_snow_level: DEFAULT_SNOW_LEVEL,
            spawn_row_min: -3,
            spawn_row_max: 2,
            frame_interval_ms: FRAME_INTERVAL_MS,
        }
    }
}

impl SnowfieldConfig {
    /// Check the parameters against a display geometry
    pub fn validate(&self, geometry: &Geometry) -> Result<(), SetupError> {
        let max = geometry.bottom_row();
        if self.default_snow_level < 0 || self.default_snow_level > max {
            return Err(SetupError::SnowLevelOutOfRange {
                level: self.default_snow_level,
                max,
            });
        }
        if self.spawn_row_min > self.spawn_row_max {
            return Err(SetupError::EmptySpawnRange);
        }
        Ok(())
    }
}
