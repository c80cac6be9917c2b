//! Per-display driver loop
//!
//! One [`Animation`] is bound to exactly one display. The loop checks for
//! cancellation at the top of every tick, then steps the field, renders and
//! submits the frame, and sleeps for the frame interval. Instances share
//! nothing, so any number of them can run side by side on one executor.

use embedded_hal_async::delay::DelayNs;

use crate::config::{Geometry, SetupError, SnowfieldConfig, MAX_SNOWFLAKES};
use crate::field::{SnowField, StepReport};
use crate::render;
use crate::traits::{CancelToken, Clock, Color, MonoCanvas, RandomSource};

/// Why the driver loop ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stopped {
    /// Frames submitted before cancellation
    pub frames: u32,
}

/// Errors that end a driver loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunError<E> {
    /// The instance could not be set up and never started
    Setup(SetupError),
    /// Frame submission failed
    Display(E),
}

/// Snow field bound to its clock and entropy source
pub struct Animation<K, R, const N: usize = MAX_SNOWFLAKES> {
    field: SnowField<N>,
    clock: K,
    rng: R,
}

impl<K: Clock, R: RandomSource, const N: usize> Animation<K, R, N> {
    /// Set up a field for a display of the given geometry
    pub fn new(
        geometry: Geometry,
        config: SnowfieldConfig,
        clock: K,
        rng: R,
    ) -> Result<Self, SetupError> {
        let field = SnowField::new(geometry, config, clock.now_ms())?;
        Ok(Self { field, clock, rng })
    }

    /// Advance the simulation by one tick at the current time
    pub fn tick(&mut self) -> StepReport {
        let now = self.clock.now_ms();
        self.field.step(now, &mut self.rng)
    }

    /// Tick, render and submit one frame
    pub async fn frame<C: MonoCanvas>(&mut self, canvas: &mut C) -> Result<StepReport, C::Error> {
        let report = self.tick();
        render::present(&self.field, canvas).await?;
        Ok(report)
    }

    /// Simulation state
    pub fn field(&self) -> &SnowField<N> {
        &self.field
    }
}

/// Run the snow field on one display until cancelled
///
/// Never returns under normal operation. On cancellation the display is
/// blanked and the number of frames shown is returned. A setup error means
/// nothing was ever drawn.
pub async fn run_forever<C, K, R, D, T>(
    canvas: &mut C,
    config: SnowfieldConfig,
    clock: K,
    rng: R,
    delay: &mut D,
    cancel: &T,
) -> Result<Stopped, RunError<C::Error>>
where
    C: MonoCanvas,
    K: Clock,
    R: RandomSource,
    D: DelayNs,
    T: CancelToken + ?Sized,
{
    let mut animation: Animation<K, R> =
        Animation::new(canvas.geometry(), config, clock, rng).map_err(RunError::Setup)?;
    let mut frames: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            canvas.clear(Color::Background);
            canvas.submit_frame().await.map_err(RunError::Display)?;
            return Ok(Stopped { frames });
        }

        animation.frame(canvas).await.map_err(RunError::Display)?;
        frames = frames.wrapping_add(1);

        delay.delay_ms(config.frame_interval_ms).await;
    }
}
