//! Rate-limited angle stepping
//!
//! - [`AngleStepper`]: advances a logical angle toward a target, one whole
//!   degree per `rate` milliseconds, forwarding each step to an actuator
//! - [`limits`]: absolute servo range and the clamping helpers shared by
//!   every entry point

pub mod angle;
pub mod limits;

pub use angle::{AngleStepper, MoveMode, DEFAULT_ANGLE, DEFAULT_RATE_MS};
pub use limits::{clamp_absolute, output_angle, ABSOLUTE_MAX_ANGLE, ABSOLUTE_MIN_ANGLE};
