//! Time source abstraction

/// Free-running millisecond counter
///
/// The counter is allowed to wrap; consumers must compare instants with
/// wrapping arithmetic.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        C::now_ms(self)
    }
}
