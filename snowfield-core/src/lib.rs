//! Board-agnostic core of the snowy field animation
//!
//! This crate contains everything that does not depend on a specific
//! display controller, bus or runtime:
//!
//! - Configuration types and validation
//! - Particle pool and terrain heightmap
//! - Per-tick simulation step (spawn, advance, landing)
//! - Render adapter onto a monochrome canvas
//! - The per-display driver loop
//!
//! # Data flow
//!
//! ```text
//! Clock/RandomSource ──▶ SnowField::step ──▶ pool + terrain
//!                                              │
//!                                              ▼
//!                         render::present ──▶ MonoCanvas
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod driver;
pub mod field;
pub mod render;
pub mod traits;

pub use config::{Geometry, SetupError, SnowfieldConfig};
pub use driver::{run_forever, Animation, RunError, Stopped};
pub use field::{SnowField, StepReport};
