//! Actuator driver trait
//!
//! Abstracts over whatever physically positions the output shaft
//! (a PWM servo, a serial bus servo, a simulator).

/// A positional actuator commanded in whole degrees
///
/// Commands are fire-and-forget: there is no acknowledgment channel.
/// Implementations that can fail are expected to record or log the
/// failure themselves.
pub trait ActuatorDriver {
    /// Command the actuator to an absolute position in degrees (0-180)
    fn command_position(&mut self, angle: u8);
}

/// A borrowed driver is still a driver, so a stepper can command hardware
/// it does not own.
impl<T: ActuatorDriver + ?Sized> ActuatorDriver for &mut T {
    fn command_position(&mut self, angle: u8) {
        (**self).command_position(angle)
    }
}

/// Placeholder driver for a stepper that runs without hardware
///
/// Use it as the actuator type of a stepper that only tracks logical
/// state. It is never commanded, because such a stepper is built without
/// an attached driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoActuator;

impl ActuatorDriver for NoActuator {
    fn command_position(&mut self, _angle: u8) {}
}
