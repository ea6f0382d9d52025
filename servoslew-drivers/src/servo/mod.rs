//! Servo driver implementations
//!
//! - PWM servos: angle mapped to a pulse width inside a fixed frame

pub mod pwm;

pub use pwm::{PulseRange, PwmServo};
