//! Snowy field simulation
//!
//! Particles fall straight down one row per tick and pile up on a
//! per-column heightmap. Nothing here allocates; all storage is sized at
//! compile time.

pub mod pool;
pub mod snowflake;
pub mod step;
pub mod terrain;

pub use pool::SnowflakePool;
pub use snowflake::{SlotId, Snowflake};
pub use step::{SnowField, StepReport};
pub use terrain::Terrain;
