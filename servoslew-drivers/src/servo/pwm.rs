//! Hobby servo on a PWM channel
//!
//! Standard servo timing: a pulse every 20 ms whose width selects the
//! angle, 0.5 ms = 0° through 2.5 ms = 180° by default. The channel must
//! already be configured for the frame period (50 Hz by default); this
//! driver only sets the duty cycle.
//!
//! # Usage
//!
//! ```ignore
//! let mut servo = PwmServo::new(pwm_channel, PulseRange::default());
//! servo.write_angle(90)?;
//!
//! // Or hand it to a stepper, which commands it on every step
//! let mut stepper = AngleStepper::with_actuator(clock, &mut servo);
//! ```

use embedded_hal::pwm::SetDutyCycle;
use servoslew_core::stepper::ABSOLUTE_MAX_ANGLE;
use servoslew_core::traits::ActuatorDriver;

/// Pulse timing for a servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseRange {
    /// Pulse width at 0° in microseconds
    pub min_us: u16,
    /// Pulse width at 180° in microseconds (may be below `min_us` for a
    /// reversed servo)
    pub max_us: u16,
    /// PWM frame period in microseconds
    pub period_us: u16,
}

impl Default for PulseRange {
    fn default() -> Self {
        Self {
            min_us: 500,
            max_us: 2500,
            period_us: 20_000,
        }
    }
}

impl PulseRange {
    /// Pulse width for an angle, clamped to 180° and to the frame period
    pub fn pulse_us(&self, angle: u8) -> u16 {
        let angle = i32::from(angle.min(ABSOLUTE_MAX_ANGLE));
        let min = i32::from(self.min_us);
        let span = i32::from(self.max_us) - min;
        let pulse = min + span * angle / i32::from(ABSOLUTE_MAX_ANGLE);
        (pulse.max(0) as u16).min(self.period_us)
    }
}

/// Servo driven by a single PWM output
pub struct PwmServo<P> {
    pwm: P,
    range: PulseRange,
    /// Last angle written successfully
    last_angle: Option<u8>,
    /// Latched on a failed PWM write
    fault: bool,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Create a servo driver; nothing is written until the first command
    pub fn new(pwm: P, range: PulseRange) -> Self {
        Self {
            pwm,
            range,
            last_angle: None,
            fault: false,
        }
    }

    /// Write an angle to the PWM output
    pub fn write_angle(&mut self, angle: u8) -> Result<(), P::Error> {
        let pulse = self.range.pulse_us(angle);
        self.pwm
            .set_duty_cycle_fraction(pulse, self.range.period_us.max(1))?;
        self.last_angle = Some(angle.min(ABSOLUTE_MAX_ANGLE));
        Ok(())
    }

    /// Stop sending pulses; most servos go limp
    pub fn disable(&mut self) -> Result<(), P::Error> {
        self.pwm.set_duty_cycle_fully_off()?;
        self.last_angle = None;
        Ok(())
    }

    pub fn last_angle(&self) -> Option<u8> {
        self.last_angle
    }

    pub fn pulse_range(&self) -> &PulseRange {
        &self.range
    }

    /// Check if a command failed since the last [`clear_fault`](Self::clear_fault)
    pub fn fault(&self) -> bool {
        self.fault
    }

    pub fn clear_fault(&mut self) {
        self.fault = false;
    }

    /// Give the PWM channel back
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> ActuatorDriver for PwmServo<P> {
    fn command_position(&mut self, angle: u8) {
        if self.write_angle(angle).is_err() {
            self.fault = true;
            #[cfg(feature = "defmt")]
            defmt::warn!("Servo PWM write failed (angle={})", angle);
        }
    }
}
