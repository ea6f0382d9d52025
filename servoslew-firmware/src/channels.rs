//! Inter-task communication
//!
//! Uses embassy-sync signals: each holds only the most recent value,
//! which is all a position command needs.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Target angle for the servo task (updated by the sweep task)
///
/// Starts a non-blocking move; the angle is clamped to the limits.
pub static SERVO_TARGET: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Signalled once with the final angle for every target received
pub static MOTION_DONE: Signal<CriticalSectionRawMutex, u8> = Signal::new();
