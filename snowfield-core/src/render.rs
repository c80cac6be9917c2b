//! Render adapter
//!
//! Turns the simulation state into draw calls on a [`MonoCanvas`]. Nothing
//! here mutates the field.

use crate::field::SnowField;
use crate::traits::{Color, MonoCanvas};

/// Draw one frame into the canvas frame buffer
///
/// The terrain is drawn as one vertical run per column, from its surface
/// row down to and including the bottom row. Snowflakes above the screen
/// are left to the canvas to clip.
pub fn draw_frame<C: MonoCanvas, const N: usize>(field: &SnowField<N>, canvas: &mut C) {
    canvas.clear(Color::Background);

    let bottom = field.geometry().bottom_row();
    let terrain = field.terrain();
    for column in 0..terrain.columns() {
        let top = terrain.surface_row(column);
        canvas.draw_vertical_run(column as i16, top, bottom - top + 1, Color::Foreground);
    }

    for flake in field.pool().iter_active() {
        canvas.draw_point(flake.x, flake.y, Color::Foreground);
    }
}

/// Draw one frame and submit it to the display
pub async fn present<C: MonoCanvas, const N: usize>(
    field: &SnowField<N>,
    canvas: &mut C,
) -> Result<(), C::Error> {
    draw_frame(field, canvas);
    canvas.submit_frame().await
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording canvas shared by render and driver tests

    use crate::config::Geometry;
    use crate::traits::{Color, MonoCanvas};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Call {
        Clear(Color),
        Point(i16, i16, Color),
        Run(i16, i16, i16, Color),
        Submit,
    }

    pub struct RecordingCanvas {
        pub geometry: Geometry,
        pub calls: Vec<Call>,
        /// Submissions left before `submit_frame` starts failing
        pub submits_before_failure: Option<usize>,
    }

    impl RecordingCanvas {
        pub fn new(geometry: Geometry) -> Self {
            Self {
                geometry,
                calls: Vec::new(),
                submits_before_failure: None,
            }
        }

        pub fn submits(&self) -> usize {
            self.calls.iter().filter(|c| **c == Call::Submit).count()
        }
    }

    impl MonoCanvas for RecordingCanvas {
        type Error = &'static str;

        fn geometry(&self) -> Geometry {
            self.geometry
        }

        fn clear(&mut self, color: Color) {
            self.calls.push(Call::Clear(color));
        }

        fn draw_point(&mut self, x: i16, y: i16, color: Color) {
            self.calls.push(Call::Point(x, y, color));
        }

        fn draw_vertical_run(&mut self, x: i16, top: i16, length: i16, color: Color) {
            self.calls.push(Call::Run(x, top, length, color));
        }

        async fn submit_frame(&mut self) -> Result<(), Self::Error> {
            if let Some(left) = self.submits_before_failure.as_mut() {
                if *left == 0 {
                    return Err("bus error");
                }
                *left -= 1;
            }
            self.calls.push(Call::Submit);
            Ok(())
        }
    }
}
