//! Time source trait
//!
//! The stepper never reads a global timer. Time is injected so the same
//! logic runs against a hardware tick counter or a test clock.

/// Monotonic millisecond clock
///
/// The counter is allowed to wrap at `u32::MAX`; consumers must compute
/// elapsed time with wrapping subtraction.
pub trait TimeSource {
    /// Current time in milliseconds
    fn now_ms(&self) -> u32;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Adapts a closure into a [`TimeSource`]
///
/// ```ignore
/// let clock = FnClock(|| timer.ticks_ms());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnClock<F>(pub F);

impl<F: Fn() -> u32> TimeSource for FnClock<F> {
    fn now_ms(&self) -> u32 {
        (self.0)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_clock() {
        let clock = FnClock(|| 1234u32);
        assert_eq!(clock.now_ms(), 1234);
        assert_eq!((&clock).now_ms(), 1234);
    }
}
