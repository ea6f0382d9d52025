//! Hardware abstraction traits
//!
//! These traits define the interface between the stepping logic
//! and the hardware (or simulation) it drives.

pub mod actuator;
pub mod clock;

pub use actuator::{ActuatorDriver, NoActuator};
pub use clock::{FnClock, TimeSource};
