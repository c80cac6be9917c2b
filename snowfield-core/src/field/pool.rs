//! Fixed-capacity snowflake pool
//!
//! Slots are handed out by a linear scan for the first free entry. At the
//! capacities used here (128) the scan is cheaper than maintaining a free
//! list, and a handful of allocations happen per tick at most.

use crate::config::MAX_SNOWFLAKES;

use super::snowflake::{SlotId, Snowflake};

/// Arena of snowflake slots with index reuse
#[derive(Debug, Clone)]
pub struct SnowflakePool<const N: usize = MAX_SNOWFLAKES> {
    slots: [Snowflake; N],
}

impl<const N: usize> Default for SnowflakePool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SnowflakePool<N> {
    /// Create a pool with every slot free
    pub const fn new() -> Self {
        Self {
            slots: [Snowflake::FREE; N],
        }
    }

    /// Mark every slot free and zeroed
    pub fn reset_all(&mut self) {
        self.slots.fill(Snowflake::FREE);
    }

    /// Index of the first free slot, if any
    pub fn find_free(&self) -> Option<SlotId> {
        self.slots
            .iter()
            .position(Snowflake::is_free)
            .map(|i| SlotId(i as u16))
    }

    /// Place `flake` in the first free slot
    ///
    /// The stored particle is always marked active. Returns `None` when the
    /// pool is exhausted; the caller simply gets fewer particles.
    pub fn allocate(&mut self, flake: Snowflake) -> Option<SlotId> {
        let id = self.find_free()?;
        self.slots[id.index()] = Snowflake {
            active: true,
            ..flake
        };
        Some(id)
    }

    /// Return a slot to the pool
    ///
    /// Returns `false` (and changes nothing) if the slot was already free,
    /// so a particle can never be released twice.
    pub fn release(&mut self, id: SlotId) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(slot) if slot.active => {
                *slot = Snowflake::FREE;
                true
            }
            _ => false,
        }
    }

    /// Slot contents
    pub fn get(&self, id: SlotId) -> Option<&Snowflake> {
        self.slots.get(id.index())
    }

    /// Live particles
    pub fn iter_active(&self) -> impl Iterator<Item = &Snowflake> {
        self.slots.iter().filter(|s| s.active)
    }

    /// Number of live particles
    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Total slot count
    pub const fn capacity(&self) -> usize {
        N
    }

    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut Snowflake> {
        self.slots.get_mut(id.index())
    }
}
