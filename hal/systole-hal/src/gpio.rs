//! GPIO pin abstractions
//!
//! The heartbeat line may be shared with another peripheral (a UART TX pin
//! is the usual case), so the output trait includes switching the pin back
//! into output mode, not only driving it.

use core::ops::Not;

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if this is the high level
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Check if this is the low level
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> bool {
        level.is_high()
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Put the pin into push-pull output mode
    ///
    /// Must be safe to call repeatedly; another subsystem may have
    /// reconfigured the pin in the meantime.
    fn set_as_output(&mut self);

    /// Drive the pin to a specific level
    fn set_level(&mut self, level: Level);

    /// Set the pin high (logic 1)
    fn set_high(&mut self) {
        self.set_level(Level::High);
    }

    /// Set the pin low (logic 0)
    fn set_low(&mut self) {
        self.set_level(Level::Low);
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_as_output(&mut self) {
        P::set_as_output(self);
    }

    fn set_level(&mut self, level: Level) {
        P::set_level(self, level);
    }
}
