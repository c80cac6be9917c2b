//! SSD1306 display driver and text helpers for Snowfield
//!
//! This crate provides:
//! - `DisplayInterface` trait for the bus a panel is attached through
//! - I2C and SPI (4-wire, with data/command pin) interface implementations
//! - `Ssd1306` frame-buffer driver implementing both
//!   `snowfield_core::traits::MonoCanvas` and `embedded_graphics::DrawTarget`
//! - Anchored text rendering and font cycling for the greeting demos
//!
//! # Architecture
//!
//! All drawing goes to a local, page-organised frame buffer. Only
//! [`Ssd1306::flush`] (or `MonoCanvas::submit_frame`) talks to the bus, one
//! page at a time.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod interface;
pub mod ssd1306;
pub mod text;

// Re-export key types
pub use backend::{DisplayError, DisplayInterface};
pub use interface::{I2cInterface, SpiInterface, SpiInterfaceError};
pub use ssd1306::Ssd1306;
pub use text::{draw_anchored, greeting, FontCycle, TextAnchor, DEMO_FONTS};
