//! Servo control task
//!
//! Owns the angle stepper and its PWM servo. Polls for new targets and
//! advances the stepper every millisecond.

use defmt::*;
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Ticker};

use servoslew_core::config::ServoConfig;
use servoslew_core::traits::ActuatorDriver;
use servoslew_core::{AngleStepper, MoveMode};
use servoslew_drivers::clock::EmbassyClock;
use servoslew_drivers::servo::{PulseRange, PwmServo};

use crate::channels::{MOTION_DONE, SERVO_TARGET};

/// Stepper update interval
const UPDATE_INTERVAL_MS: u64 = 1;

type Stepper = AngleStepper<EmbassyClock, PwmServo<PwmOutput<'static>>>;

/// Servo control task
///
/// The servo is driven to the configured initial angle on start, so the
/// horn matches the stepper's logical position before the first move.
#[embassy_executor::task]
pub async fn servo_task(pwm: PwmOutput<'static>, config: ServoConfig) {
    info!("Servo task started");

    let mut stepper: Stepper =
        AngleStepper::with_actuator(EmbassyClock, PwmServo::new(pwm, PulseRange::default()));
    config.apply(&mut stepper);

    let home = stepper.output_angle();
    if let Some(servo) = stepper.actuator_mut() {
        servo.command_position(home);
    }
    info!(
        "Servo at {}°, {} ms/deg, limits {}-{}°",
        stepper.angle(),
        stepper.rate(),
        stepper.min_angle(),
        stepper.max_angle()
    );

    let mut ticker = Ticker::every(Duration::from_millis(UPDATE_INTERVAL_MS));
    // A target was received and its completion not yet reported
    let mut awaiting_done = false;

    loop {
        if let Some(angle) = SERVO_TARGET.try_take() {
            debug!("Servo target: {}°", angle);
            stepper.move_to(angle, MoveMode::NonBlocking);
            awaiting_done = true;
        }

        let moving = stepper.update();
        trace!("Servo update: angle={} moving={}", stepper.angle(), moving);

        // Single reporting point, so each target completes exactly once,
        // including a target equal to the current angle
        if awaiting_done && !moving {
            debug!("Servo reached {}°", stepper.angle());
            MOTION_DONE.signal(stepper.angle());
            awaiting_done = false;
        }

        check_fault(&mut stepper);

        ticker.next().await;
    }
}

fn check_fault(stepper: &mut Stepper) {
    if let Some(servo) = stepper.actuator_mut() {
        if servo.fault() {
            warn!("Servo PWM fault, last good angle {:?}", servo.last_angle());
            servo.clear_fault();
        }
    }
}
