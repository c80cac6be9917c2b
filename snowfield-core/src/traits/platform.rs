//! Time, entropy and cancellation sources

use core::sync::atomic::{AtomicBool, Ordering};

use rand::{Rng, RngCore};

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin
    fn now_ms(&self) -> u64;
}

/// Uniform integer source
pub trait RandomSource {
    /// Uniform value in `min..=max`
    ///
    /// Callers guarantee `min <= max`.
    fn range_inclusive(&mut self, min: i16, max: i16) -> i16;
}

impl<R: RngCore> RandomSource for R {
    fn range_inclusive(&mut self, min: i16, max: i16) -> i16 {
        self.gen_range(min..=max)
    }
}

/// Cooperative cancellation flag, polled once per tick
pub trait CancelToken {
    /// Whether the owner asked the loop to stop
    fn is_cancelled(&self) -> bool;
}

impl CancelToken for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancelToken + ?Sized> CancelToken for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}
