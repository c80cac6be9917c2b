//! Monochrome canvas trait for the display collaborator

use crate::config::Geometry;

/// Pixel color on a binary display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off
    Background,
    /// Pixel on
    Foreground,
}

/// Frame-buffered monochrome display
///
/// Drawing goes to a local frame buffer and cannot fail; coordinates
/// outside the visible area are clipped silently. Only
/// [`submit_frame`](MonoCanvas::submit_frame) touches the hardware.
pub trait MonoCanvas {
    /// Error type for frame submission
    type Error;

    /// Pixel geometry, fixed for the lifetime of the canvas
    fn geometry(&self) -> Geometry;

    /// Fill the whole frame buffer with one color
    fn clear(&mut self, color: Color);

    /// Set a single pixel
    fn draw_point(&mut self, x: i16, y: i16, color: Color);

    /// Draw `length` pixels in column `x`, from row `top` downwards
    fn draw_vertical_run(&mut self, x: i16, top: i16, length: i16, color: Color);

    /// Send the frame buffer to the display
    #[allow(async_fn_in_trait)]
    async fn submit_frame(&mut self) -> Result<(), Self::Error>;
}
