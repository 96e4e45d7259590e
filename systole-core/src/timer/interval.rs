//! Millisecond interval timer
//!
//! Polled timer: nothing happens in the background, the owner asks
//! [`IntervalTimer::has_elapsed`] from its main loop.

use systole_hal::Clock;

use crate::traits::PeriodicTimer;

/// Interval timer over a free-running millisecond clock
///
/// Elapsed time is computed with wrapping subtraction, so the timer keeps
/// working across the ~49 day rollover of a `u32` millisecond counter.
#[derive(Debug, Clone)]
pub struct IntervalTimer<C> {
    clock: C,
    period_ms: u32,
    /// Clock reading at the start of the current interval
    start_ms: u32,
}

impl<C: Clock> IntervalTimer<C> {
    /// Create a timer and start the first interval now
    pub fn new(clock: C, period_ms: u32) -> Self {
        let start_ms = clock.now_ms();
        Self {
            clock,
            period_ms,
            start_ms,
        }
    }

    /// Start a new interval from the current time
    pub fn restart(&mut self) {
        self.start_ms = self.clock.now_ms();
    }

    /// Milliseconds since the current interval started
    pub fn elapsed_ms(&self) -> u32 {
        self.clock.now_ms().wrapping_sub(self.start_ms)
    }
}

impl<C: Clock> PeriodicTimer for IntervalTimer<C> {
    fn set_period(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
        self.restart();
    }

    fn period(&self) -> u32 {
        self.period_ms
    }

    fn has_elapsed(&mut self) -> bool {
        let elapsed = self.elapsed_ms();
        if elapsed >= self.period_ms {
            self.start_ms = self.start_ms.wrapping_add(elapsed);
            true
        } else {
            false
        }
    }
}
