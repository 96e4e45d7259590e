//! Timer implementations
//!
//! Concrete [`PeriodicTimer`](crate::traits::PeriodicTimer) implementations
//! driven by a HAL [`Clock`](systole_hal::Clock).

pub mod interval;

pub use interval::IntervalTimer;
