//! Collaborator traits
//!
//! These traits define the interface between the simulation and the
//! display, clock and entropy implementations provided by the platform.

pub mod canvas;
pub mod platform;

pub use canvas::{Color, MonoCanvas};
pub use platform::{CancelToken, Clock, RandomSource};
