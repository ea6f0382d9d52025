//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod servo;
pub mod sweep;

pub use servo::servo_task;
pub use sweep::{sweep_task, SweepConfig};
