//! servoslew - rate-limited servo firmware
//!
//! Main firmware binary for RP2040 boards. Drives one hobby servo on
//! GPIO16 at a bounded angular rate, sweeping between the configured
//! limits.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::types::U12F4;
use {defmt_rtt as _, panic_probe as _};

use servoslew_core::config::{parse_servo_config, ServoConfig};

mod channels;
mod tasks;

use tasks::SweepConfig;

/// Embedded configuration (compiled into firmware)
/// Edit servo.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../servo.toml");

/// 125 MHz system clock / 125 = 1 MHz PWM counter (1 µs per count)
const PWM_DIVIDER: u8 = 125;

/// 20 000 counts per frame = 50 Hz servo frame
const PWM_TOP: u16 = 19_999;

/// Pause at each end of the sweep
const SWEEP_DWELL_MS: u64 = 1_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("servoslew firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = U12F4::from_num(PWM_DIVIDER);
    pwm_config.top = PWM_TOP;
    pwm_config.compare_a = 0;

    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config);
    let (output, _) = pwm.split();
    let output = unwrap!(output);
    info!("PWM configured: GPIO16, 50 Hz");

    let sweep = SweepConfig {
        low: config.min_angle,
        high: config.max_angle,
        dwell_ms: SWEEP_DWELL_MS,
    };

    spawner.spawn(tasks::servo_task(output, config)).unwrap();
    spawner.spawn(tasks::sweep_task(sweep)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded servo.toml, falling back to defaults
///
/// build.rs already rejects an invalid file, so the fallback only
/// guards against the two parsers disagreeing.
fn load_config() -> ServoConfig {
    match parse_servo_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Config loaded: {}", config);
            config
        }
        Err(e) => {
            warn!("Config parse failed ({}), using defaults", e);
            ServoConfig::default()
        }
    }
}
