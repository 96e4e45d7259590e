//! Periodic timer trait

/// Periodic interval timer
///
/// Tracks elapsed time against a configured period and reports each elapsed
/// interval exactly once.
pub trait PeriodicTimer {
    /// Set the period in milliseconds
    ///
    /// Implementations restart the current interval.
    fn set_period(&mut self, period_ms: u32);

    /// Get the configured period in milliseconds
    fn period(&self) -> u32;

    /// Check whether the period has elapsed since the last reset
    ///
    /// Returning `true` resets the reference point, so a single elapsed
    /// interval is reported once.
    fn has_elapsed(&mut self) -> bool;
}

impl<T: PeriodicTimer + ?Sized> PeriodicTimer for &mut T {
    fn set_period(&mut self, period_ms: u32) {
        T::set_period(self, period_ms);
    }

    fn period(&self) -> u32 {
        T::period(self)
    }

    fn has_elapsed(&mut self) -> bool {
        T::has_elapsed(self)
    }
}
