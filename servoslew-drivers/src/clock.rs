//! Time sources
//!
//! [`EmbassyClock`] reads the embassy time driver. It is only built with
//! the `embassy` feature, since the time driver is supplied by the chip
//! HAL at link time.

#[cfg(feature = "embassy")]
pub use self::embassy::EmbassyClock;

#[cfg(feature = "embassy")]
mod embassy {
    use embassy_time::Instant;
    use servoslew_core::traits::TimeSource;

    /// Millisecond clock backed by `embassy_time::Instant`
    ///
    /// The 64-bit tick count is truncated to 32 bits; the stepper's
    /// wrapping arithmetic makes the rollover invisible.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct EmbassyClock;

    impl TimeSource for EmbassyClock {
        fn now_ms(&self) -> u32 {
            Instant::now().as_millis() as u32
        }
    }
}
