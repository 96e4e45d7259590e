//! Heartbeat output pin
//!
//! Wraps an embassy [`Flex`] pin so the heartbeat controller can switch the
//! pin back to output mode after another user of the line is done with it.

use embassy_rp::gpio::{Flex, Level as RpLevel, Pin};
use embassy_rp::Peri;
use systole_hal::{Level, OutputPin};

/// RP2040 GPIO usable as a heartbeat output
pub struct FlexOutput<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexOutput<'d> {
    /// Wrap a GPIO
    ///
    /// The pin is left in its reset mode until
    /// [`OutputPin::set_as_output`] is called.
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Flex::new(pin),
        }
    }
}

impl OutputPin for FlexOutput<'_> {
    fn set_as_output(&mut self) {
        self.pin.set_as_output();
    }

    fn set_level(&mut self, level: Level) {
        self.pin.set_level(to_rp_level(level));
    }
}

/// Convert a HAL level into the embassy-rp level
pub const fn to_rp_level(level: Level) -> RpLevel {
    match level {
        Level::High => RpLevel::High,
        Level::Low => RpLevel::Low,
    }
}
