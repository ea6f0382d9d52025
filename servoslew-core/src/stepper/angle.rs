//! Non-blocking angle stepper
//!
//! Moves a servo from its current angle to a target angle at a bounded
//! rate, expressed as the minimum number of milliseconds that must pass
//! before the angle may advance by one degree.
//!
//! # Usage
//!
//! The stepper never spawns work of its own. The caller sets a target and
//! then calls `update()` from its control loop as often as it likes; each
//! call converts the time elapsed since the last committed step into whole
//! degrees and forwards the new angle to the actuator.
//!
//! ```ignore
//! let mut stepper = AngleStepper::with_actuator(clock, &mut servo);
//! stepper.begin(90);
//! stepper.set_rate(10); // 10 ms per degree = 100 deg/s
//! stepper.move_to(150, MoveMode::NonBlocking);
//!
//! // In the control loop:
//! stepper.update();
//! ```
//!
//! Fractional progress toward the next degree is kept: while less than one
//! degree's worth of time has accrued, `update()` leaves the timestamp
//! alone so the elapsed time keeps accumulating across calls.

use super::limits::{clamp_absolute, output_angle, ABSOLUTE_MAX_ANGLE, ABSOLUTE_MIN_ANGLE};
use crate::traits::{ActuatorDriver, TimeSource};

/// Angle a freshly constructed stepper starts at
pub const DEFAULT_ANGLE: u8 = 90;

/// Default rate in milliseconds per degree
pub const DEFAULT_RATE_MS: u16 = 1;

/// Wrapped differences above this are read as the clock going backward
const MAX_FORWARD_ELAPSED_MS: u32 = i32::MAX as u32;

/// Whether a move call returns immediately or runs the move to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveMode {
    /// Return immediately; the caller keeps calling `update()`
    #[default]
    NonBlocking,
    /// Busy-wait inside the call until the target is reached
    Blocking,
}

/// Rate-limited stepper for a single servo axis
///
/// `C` is the injected time source. `A` is the actuator driver, which may
/// be absent: without one the stepper still tracks logical position but
/// issues no physical commands. Pass `&mut driver` to keep ownership of
/// the driver elsewhere.
pub struct AngleStepper<C, A> {
    clock: C,
    actuator: Option<A>,
    /// Last angle committed (and commanded, if an actuator is attached)
    current_angle: u8,
    /// Desired final angle, always within [min_angle, max_angle]
    target_angle: u8,
    /// Minimum milliseconds per degree of travel (never 0)
    ms_per_degree: u16,
    min_angle: u8,
    max_angle: u8,
    /// Offset applied to the physical command only
    trim: i8,
    /// Time of the last committed step (or idle refresh)
    last_update_ms: u32,
}

impl<C: TimeSource, A: ActuatorDriver> AngleStepper<C, A> {
    /// Create a stepper with no actuator attached
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            actuator: None,
            current_angle: DEFAULT_ANGLE,
            target_angle: DEFAULT_ANGLE,
            ms_per_degree: DEFAULT_RATE_MS,
            min_angle: ABSOLUTE_MIN_ANGLE,
            max_angle: ABSOLUTE_MAX_ANGLE,
            trim: 0,
            last_update_ms: 0,
        }
    }

    /// Create a stepper that commands the given actuator
    pub fn with_actuator(clock: C, actuator: A) -> Self {
        let mut stepper = Self::new(clock);
        stepper.actuator = Some(actuator);
        stepper
    }

    /// Seed the current angle and cancel any pending move
    ///
    /// The seed is clamped to the absolute servo range, not to the
    /// configured limits. Rate, trim and limits are left untouched.
    pub fn begin(&mut self, angle: u8) {
        self.current_angle = clamp_absolute(angle);
        self.stop();
    }

    /// Set the target angle, clamped to [min, max]
    ///
    /// Nothing moves until `update()` or one of the move calls runs.
    pub fn set_angle(&mut self, angle: u8) {
        self.target_angle = angle.clamp(self.min_angle, self.max_angle);
    }

    /// Check if the stepper still has distance to cover
    pub fn moving(&self) -> bool {
        self.current_angle != self.target_angle
    }

    /// Cancel the current move, holding the current angle
    pub fn stop(&mut self) {
        self.target_angle = self.current_angle;
    }

    /// Advance toward the target by however many whole degrees have been
    /// earned since the last step
    ///
    /// Returns `true` while further calls are still needed to reach the
    /// target.
    pub fn update(&mut self) -> bool {
        let now = self.clock.now_ms();

        if self.current_angle == self.target_angle {
            self.last_update_ms = now;
            return false;
        }

        let Some(elapsed) = elapsed_ms(self.last_update_ms, now) else {
            // Clock went backward. Re-anchor, or the move stalls until the
            // clock catches up with the stale timestamp.
            self.last_update_ms = now;
            return true;
        };

        let rate = u32::from(self.ms_per_degree);
        if elapsed < rate {
            // Not a whole degree yet. The timestamp stays put so the
            // partial time is not lost.
            return true;
        }

        let next = step_toward(self.current_angle, self.target_angle, elapsed / rate);

        if let Some(actuator) = self.actuator.as_mut() {
            actuator.command_position(output_angle(next, self.trim));
        }

        self.current_angle = next;
        self.last_update_ms = now;

        self.current_angle != self.target_angle
    }

    /// Start a move toward the current target
    ///
    /// The rate clock is synchronized to now first, so time spent idle
    /// before the move cannot turn into an instant multi-degree jump.
    /// With [`MoveMode::Blocking`] this call spins on `update()` until the
    /// target is reached; there is no timeout.
    pub fn start_move(&mut self, mode: MoveMode) {
        self.last_update_ms = self.clock.now_ms();

        if mode == MoveMode::Blocking {
            while self.update() {
                core::hint::spin_loop();
            }
        }
    }

    /// Run the pending move to completion before returning
    pub fn move_now(&mut self) {
        self.start_move(MoveMode::Blocking);
    }

    /// Set a new target and start moving toward it
    pub fn move_to(&mut self, angle: u8, mode: MoveMode) {
        self.set_angle(angle);
        self.start_move(mode);
    }

    /// Set a new target and block until it is reached
    pub fn move_to_now(&mut self, angle: u8) {
        self.move_to(angle, MoveMode::Blocking);
    }

    /// Get the current logical angle
    pub fn angle(&self) -> u8 {
        self.current_angle
    }

    /// Get the target angle
    pub fn target_angle(&self) -> u8 {
        self.target_angle
    }

    /// Physical command for the current angle (trim applied, clamped)
    pub fn output_angle(&self) -> u8 {
        output_angle(self.current_angle, self.trim)
    }

    /// Set the rate in milliseconds per degree (0 is treated as 1)
    pub fn set_rate(&mut self, ms_per_degree: u16) {
        self.ms_per_degree = ms_per_degree.max(1);
    }

    /// Get the rate in milliseconds per degree
    pub fn rate(&self) -> u16 {
        self.ms_per_degree
    }

    /// Set the rate from a speed in degrees per second
    ///
    /// Speeds above 1000 deg/s saturate at 1 ms per degree.
    pub fn set_speed_dps(&mut self, degrees_per_second: u16) {
        self.set_rate(1000 / degrees_per_second.max(1));
    }

    /// Set the lower limit for target angles
    ///
    /// Raises the upper limit if needed to keep `min <= max`, and pulls
    /// the target back inside the new window.
    pub fn set_min(&mut self, angle: u8) {
        self.min_angle = clamp_absolute(angle);
        if self.min_angle > self.max_angle {
            self.max_angle = self.min_angle;
        }
        self.reclamp_target();
    }

    /// Set the upper limit for target angles
    ///
    /// Lowers the lower limit if needed to keep `min <= max`, and pulls
    /// the target back inside the new window.
    pub fn set_max(&mut self, angle: u8) {
        self.max_angle = clamp_absolute(angle);
        if self.max_angle < self.min_angle {
            self.min_angle = self.max_angle;
        }
        self.reclamp_target();
    }

    /// Get the lower target limit
    pub fn min_angle(&self) -> u8 {
        self.min_angle
    }

    /// Get the upper target limit
    pub fn max_angle(&self) -> u8 {
        self.max_angle
    }

    /// Set the physical trim offset
    ///
    /// Only the value sent to the actuator changes; logical angles and
    /// motion planning are unaffected.
    pub fn set_trim(&mut self, trim: i8) {
        self.trim = trim;
    }

    pub fn trim(&self) -> i8 {
        self.trim
    }

    /// Time of the last committed step, in clock milliseconds
    pub fn last_update_ms(&self) -> u32 {
        self.last_update_ms
    }

    /// Attach an actuator, returning the one it replaces
    pub fn attach(&mut self, actuator: A) -> Option<A> {
        self.actuator.replace(actuator)
    }

    /// Detach the actuator; the stepper keeps tracking logical state
    pub fn detach(&mut self) -> Option<A> {
        self.actuator.take()
    }

    pub fn actuator(&self) -> Option<&A> {
        self.actuator.as_ref()
    }

    pub fn actuator_mut(&mut self) -> Option<&mut A> {
        self.actuator.as_mut()
    }

    fn reclamp_target(&mut self) {
        self.target_angle = self.target_angle.clamp(self.min_angle, self.max_angle);
    }
}

/// Wrapping-safe elapsed time, or `None` if `now` is behind `since`
fn elapsed_ms(since: u32, now: u32) -> Option<u32> {
    let elapsed = now.wrapping_sub(since);
    (elapsed <= MAX_FORWARD_ELAPSED_MS).then_some(elapsed)
}

/// Move `steps` degrees from `current` toward `target` without overshoot
fn step_toward(current: u8, target: u8, steps: u32) -> u8 {
    let current = u32::from(current);
    let target = u32::from(target);

    let next = if target > current {
        current.saturating_add(steps).min(target)
    } else {
        current.saturating_sub(steps).max(target)
    };

    next as u8
}
