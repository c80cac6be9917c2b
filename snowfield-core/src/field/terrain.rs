//! Terrain heightmap
//!
//! One accumulated snow height per display column, measured in pixels
//! above the bottom edge. Heights are clamped to `[floor, height - 1]` at
//! the moment they change, so the bounds hold between any two calls.

use heapless::Vec;

use crate::config::{Geometry, SetupError, MAX_COLUMNS};

/// Height difference at which a landing spills onto a neighbor
const SPILL_THRESHOLD: i16 = 2;

/// Per-column snow heights
#[derive(Debug, Clone)]
pub struct Terrain {
    heights: Vec<i16, MAX_COLUMNS>,
    geometry: Geometry,
    /// Lower clamp bound (the baseline snow level)
    floor: i16,
}

impl Terrain {
    /// Create a heightmap with every column at `floor`
    pub fn new(geometry: Geometry, floor: i16) -> Result<Self, SetupError> {
        let mut heights = Vec::new();
        heights
            .resize(geometry.width() as usize, 0)
            .map_err(|_| SetupError::TooManyColumns {
                width: geometry.width(),
                max: MAX_COLUMNS as u16,
            })?;

        check_level(&geometry, floor)?;

        let mut terrain = Self {
            heights,
            geometry,
            floor,
        };
        terrain.reset(floor)?;
        Ok(terrain)
    }

    /// Set every column to `initial_level`
    ///
    /// Rejects levels outside `floor..=height-1` and leaves the map
    /// unchanged.
    pub fn reset(&mut self, initial_level: i16) -> Result<(), SetupError> {
        check_level(&self.geometry, initial_level)?;
        if initial_level < self.floor {
            return Err(SetupError::SnowLevelBelowFloor {
                level: initial_level,
                floor: self.floor,
            });
        }
        self.heights.fill(initial_level);
        Ok(())
    }

    /// Accrete one unit of snow at `column` and spill onto steep neighbors
    ///
    /// Neighbor comparisons use the landing column's height from before the
    /// increment. Left is handled before right. Out-of-range columns are
    /// ignored.
    pub fn on_landing(&mut self, column: usize) {
        let Some(&before) = self.heights.get(column) else {
            return;
        };

        self.raise(column);

        if column > 0 && before - self.heights[column - 1] >= SPILL_THRESHOLD {
            self.raise(column - 1);
        }

        let right = column + 1;
        if right < self.heights.len() && before - self.heights[right] >= SPILL_THRESHOLD {
            self.raise(right);
        }
    }

    /// Topmost row covered by snow in `column`
    pub fn surface_row(&self, column: usize) -> i16 {
        let height = self.heights.get(column).copied().unwrap_or(self.floor);
        self.geometry.bottom_row() - height
    }

    /// Height of one column
    pub fn height(&self, column: usize) -> Option<i16> {
        self.heights.get(column).copied()
    }

    /// All column heights, left to right
    pub fn heights(&self) -> &[i16] {
        &self.heights
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.heights.len()
    }

    /// Lower clamp bound
    pub fn floor(&self) -> i16 {
        self.floor
    }

    fn raise(&mut self, column: usize) {
        let max = self.geometry.bottom_row();
        let h = &mut self.heights[column];
        *h = (*h + 1).clamp(self.floor, max);
    }

    #[cfg(test)]
    pub(crate) fn with_heights(geometry: Geometry, floor: i16, heights: &[i16]) -> Self {
        Self {
            heights: Vec::from_slice(heights).unwrap(),
            geometry,
            floor,
        }
    }
}

/// A level must name a row on the display
fn check_level(geometry: &Geometry, level: i16) -> Result<(), SetupError> {
    let max = geometry.bottom_row();
    if (0..=max).contains(&level) {
        Ok(())
    } else {
        Err(SetupError::SnowLevelOutOfRange { level, max })
    }
}
