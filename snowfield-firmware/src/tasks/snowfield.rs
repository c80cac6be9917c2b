//! Snow field animation on one panel

use core::fmt::Debug;

use defmt::*;
use embassy_time::{Delay, Instant};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use snowfield_core::traits::{Clock, MonoCanvas};
use snowfield_core::{run_forever, RunError, SnowfieldConfig};

use crate::channels::STOP;

/// Milliseconds since boot from the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Per-display seed; panels started in the same tick still diverge
fn seed(index: usize) -> u64 {
    Instant::now().as_ticks() ^ ((index as u64 + 1) << 48)
}

/// Run the snow field until the stop flag is set or the panel fails
pub async fn animate<C>(label: &'static str, index: usize, canvas: &mut C)
where
    C: MonoCanvas,
    C::Error: Debug,
{
    info!("{}: snow field started", label);

    let rng = SmallRng::seed_from_u64(seed(index));
    let result = run_forever(
        canvas,
        SnowfieldConfig::default(),
        EmbassyClock,
        rng,
        &mut Delay,
        &STOP,
    )
    .await;

    match result {
        Ok(stopped) => info!("{}: stopped after {} frames", label, stopped.frames),
        Err(RunError::Setup(e)) => error!("{}: setup failed: {:?}", label, e),
        Err(RunError::Display(e)) => error!("{}: display error: {:?}", label, Debug2Format(&e)),
    }
}
