//! Board-agnostic core logic for rate-limited servo motion
//!
//! This crate contains everything that does not depend on a specific
//! chip or PWM peripheral:
//!
//! - Hardware abstraction traits (actuator driver, time source)
//! - The [`AngleStepper`](stepper::AngleStepper), which walks a logical
//!   angle toward a target at a bounded degrees-per-time rate
//! - Servo configuration types and a small config parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod stepper;
pub mod traits;

pub use stepper::{AngleStepper, MoveMode};
pub use traits::{ActuatorDriver, NoActuator, TimeSource};
