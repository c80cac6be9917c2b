//! Snowflake particle

/// Index of a slot in the [`SnowflakePool`](super::SnowflakePool)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotId(pub(crate) u16);

impl SlotId {
    /// Raw slot index
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// One falling particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snowflake {
    /// Column, fixed after creation
    pub x: i16,
    /// Row; negative while above the visible area
    pub y: i16,
    /// Horizontal velocity. Reserved for drift, always 0 and never applied.
    pub dx: i8,
    /// Vertical velocity in rows per tick
    pub dy: i8,
    /// Whether the slot holds a live particle
    pub active: bool,
}

impl Snowflake {
    /// An inactive, zeroed slot
    pub const FREE: Self = Self {
        x: 0,
        y: 0,
        dx: 0,
        dy: 0,
        active: false,
    };

    /// Whether the slot can be handed out
    pub const fn is_free(&self) -> bool {
        !self.active
    }
}
