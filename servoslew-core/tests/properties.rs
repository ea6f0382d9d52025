//! Property tests for the angle stepper

use std::cell::Cell;

use proptest::prelude::*;
use servoslew_core::stepper::{clamp_absolute, output_angle};
use servoslew_core::{ActuatorDriver, AngleStepper, MoveMode, NoActuator, TimeSource};

struct TestClock(Cell<u32>);

impl TestClock {
    fn new() -> Self {
        Self(Cell::new(0))
    }

    fn advance(&self, ms: u32) {
        self.0.set(self.0.get() + ms);
    }
}

impl TimeSource for TestClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

#[derive(Default)]
struct Recorder {
    commands: Vec<u8>,
}

impl ActuatorDriver for Recorder {
    fn command_position(&mut self, angle: u8) {
        self.commands.push(angle);
    }
}

proptest! {
    #[test]
    fn clamping_is_idempotent(angle in any::<u8>()) {
        let once = clamp_absolute(angle);
        prop_assert_eq!(clamp_absolute(once), once);
        prop_assert!(once <= 180);
    }

    #[test]
    fn target_stays_within_limits(
        min in any::<u8>(),
        max in any::<u8>(),
        angle in any::<u8>(),
    ) {
        let clock = TestClock::new();
        let mut stepper: AngleStepper<_, NoActuator> = AngleStepper::new(&clock);
        stepper.set_min(min);
        stepper.set_max(max);
        stepper.set_angle(angle);

        prop_assert!(stepper.min_angle() <= stepper.max_angle());
        prop_assert!(stepper.target_angle() >= stepper.min_angle());
        prop_assert!(stepper.target_angle() <= stepper.max_angle());
    }

    #[test]
    fn converges_without_overshoot(
        start in 0u8..=180,
        target in 0u8..=180,
        rate in 1u16..50,
        gaps in prop::collection::vec(0u32..120, 1..64),
    ) {
        let clock = TestClock::new();
        let mut stepper = AngleStepper::with_actuator(&clock, Recorder::default());
        stepper.set_rate(rate);
        stepper.begin(start);
        stepper.move_to(target, MoveMode::NonBlocking);

        let low = start.min(target);
        let high = start.max(target);
        let mut previous = start;

        // Irregular polling first, then steady polling until done
        for gap in gaps.iter().copied().chain(std::iter::repeat(u32::from(rate))) {
            clock.advance(gap);
            let processing = stepper.update();
            let angle = stepper.angle();

            prop_assert!(angle >= low && angle <= high);
            // Monotonic progress toward the target
            if target >= start {
                prop_assert!(angle >= previous);
            } else {
                prop_assert!(angle <= previous);
            }
            previous = angle;

            if !processing {
                break;
            }
        }

        prop_assert!(!stepper.moving());
        prop_assert_eq!(stepper.angle(), target);
        if start != target {
            let commands = &stepper.actuator().unwrap().commands;
            prop_assert_eq!(commands.last().copied(), Some(target));
        }
    }

    #[test]
    fn rate_gate_blocks_sub_degree_updates(
        rate in 2u16..1000,
        target in 0u8..=180,
        fraction in 0u32..1000,
    ) {
        prop_assume!(target != 90);

        let clock = TestClock::new();
        let mut stepper: AngleStepper<_, NoActuator> = AngleStepper::new(&clock);
        stepper.set_rate(rate);
        stepper.move_to(target, MoveMode::NonBlocking);

        let dt = fraction % u32::from(rate);
        clock.advance(dt);
        stepper.update();

        prop_assert_eq!(stepper.angle(), 90);
        prop_assert_eq!(stepper.last_update_ms(), 0);
    }

    #[test]
    fn idle_update_is_a_no_op(seed in any::<u8>(), dt in any::<u16>()) {
        let clock = TestClock::new();
        let mut stepper = AngleStepper::with_actuator(&clock, Recorder::default());
        stepper.begin(seed);

        clock.advance(u32::from(dt));
        let before = (stepper.angle(), stepper.target_angle());
        prop_assert!(!stepper.update());
        prop_assert_eq!((stepper.angle(), stepper.target_angle()), before);
        prop_assert!(stepper.actuator().unwrap().commands.is_empty());
    }

    #[test]
    fn trim_only_changes_the_command(
        trims in prop::collection::vec(any::<i8>(), 1..20),
    ) {
        let clock = TestClock::new();
        let mut trimmed = AngleStepper::with_actuator(&clock, Recorder::default());
        let mut plain: AngleStepper<_, NoActuator> = AngleStepper::new(&clock);

        prepare(&mut trimmed);
        prepare(&mut plain);

        for trim in trims {
            trimmed.set_trim(trim);
            clock.advance(3);
            trimmed.update();
            plain.update();

            prop_assert_eq!(trimmed.angle(), plain.angle());
            prop_assert_eq!(trimmed.target_angle(), plain.target_angle());
            if let Some(&last) = trimmed.actuator().unwrap().commands.last() {
                prop_assert_eq!(last, output_angle(trimmed.angle(), trim));
            }
        }
    }

    #[test]
    fn stop_freezes_position(target in 0u8..=180, elapsed in 0u32..500) {
        let clock = TestClock::new();
        let mut stepper: AngleStepper<_, NoActuator> = AngleStepper::new(&clock);
        stepper.set_rate(7);
        stepper.move_to(target, MoveMode::NonBlocking);

        clock.advance(elapsed);
        stepper.update();

        let held = stepper.angle();
        stepper.stop();
        prop_assert!(!stepper.moving());
        prop_assert_eq!(stepper.angle(), held);

        clock.advance(1000);
        stepper.update();
        prop_assert_eq!(stepper.angle(), held);
    }
}

fn prepare<C: TimeSource, A: ActuatorDriver>(stepper: &mut AngleStepper<C, A>) {
    stepper.set_rate(3);
    stepper.begin(10);
    stepper.move_to(170, MoveMode::NonBlocking);
}
