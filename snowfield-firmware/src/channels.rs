//! Inter-task communication
//!
//! Shared state between the display tasks, the stop button and `main`.

use core::sync::atomic::AtomicBool;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Channel capacity for finished-task notices
const DONE_CHANNEL_SIZE: usize = 8;

/// Cancellation flag, set once by a long press on the stop button
///
/// Every display task checks it at the top of each frame.
pub static STOP: AtomicBool = AtomicBool::new(false);

/// Labels of display tasks that have ended
pub static DISPLAY_DONE: Channel<CriticalSectionRawMutex, &'static str, DONE_CHANNEL_SIZE> =
    Channel::new();
