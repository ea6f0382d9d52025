//! Demo sweep task
//!
//! Sends the servo back and forth between two angles, dwelling at each
//! end once the move has finished.

use defmt::*;
use embassy_time::{Duration, Timer};

use crate::channels::{MOTION_DONE, SERVO_TARGET};

/// Sweep endpoints and dwell time
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    pub low: u8,
    pub high: u8,
    pub dwell_ms: u64,
}

#[embassy_executor::task]
pub async fn sweep_task(config: SweepConfig) {
    info!(
        "Sweep task started: {}° <-> {}°, dwell {} ms",
        config.low, config.high, config.dwell_ms
    );

    let mut toward_high = true;

    loop {
        let target = if toward_high { config.high } else { config.low };

        MOTION_DONE.reset();
        SERVO_TARGET.signal(target);

        let reached = MOTION_DONE.wait().await;
        info!("Sweep: reached {}°", reached);

        Timer::after(Duration::from_millis(config.dwell_ms)).await;
        toward_high = !toward_high;
    }
}
