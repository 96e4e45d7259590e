//! Configuration type definitions

use systole_hal::Level;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default heartbeat period (15 s)
pub const DEFAULT_PERIOD_MS: u32 = 15 * 1000;

/// Default heartbeat pulse width
pub const DEFAULT_PULSE_MS: u8 = 10;

/// Default timing values used when a setter receives zero
///
/// Kept as data rather than constants so tests and boards can substitute
/// their own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timing {
    /// Period between heartbeat pulses (ms)
    pub period_ms: u32,
    /// Time the line is held at the active level (ms)
    pub pulse_ms: u8,
}

impl Timing {
    /// Compiled-in defaults
    pub const DEFAULT: Self = Self {
        period_ms: DEFAULT_PERIOD_MS,
        pulse_ms: DEFAULT_PULSE_MS,
    };

    /// Create timing defaults
    ///
    /// Zero values fall back to the compiled-in defaults, so the resolved
    /// period and pulse width are never zero.
    pub const fn new(period_ms: u32, pulse_ms: u8) -> Self {
        Self {
            period_ms: if period_ms == 0 {
                DEFAULT_PERIOD_MS
            } else {
                period_ms
            },
            pulse_ms: if pulse_ms == 0 {
                DEFAULT_PULSE_MS
            } else {
                pulse_ms
            },
        }
    }

    /// Resolve a requested period, mapping zero to the default
    pub const fn resolve_period(&self, period_ms: u32) -> u32 {
        if period_ms == 0 {
            Self::new(self.period_ms, self.pulse_ms).period_ms
        } else {
            period_ms
        }
    }

    /// Resolve a requested pulse width, mapping zero to the default
    pub const fn resolve_pulse(&self, pulse_ms: u8) -> u8 {
        if pulse_ms == 0 {
            Self::new(self.period_ms, self.pulse_ms).pulse_ms
        } else {
            pulse_ms
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Heartbeat polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Pulse is high, line rests low
    #[default]
    ActiveHigh,
    /// Pulse is low, line rests high
    ActiveLow,
}

impl Polarity {
    /// Polarity from the "reverse" flag used in config files
    pub const fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }

    /// Check if this is the reversed (active-low) polarity
    pub const fn is_reverse(self) -> bool {
        matches!(self, Polarity::ActiveLow)
    }

    /// Level asserted during a pulse
    pub const fn active_level(self) -> Level {
        match self {
            Polarity::ActiveHigh => Level::High,
            Polarity::ActiveLow => Level::Low,
        }
    }

    /// Level held between pulses
    pub const fn idle_level(self) -> Level {
        match self {
            Polarity::ActiveHigh => Level::Low,
            Polarity::ActiveLow => Level::High,
        }
    }
}

/// Complete heartbeat setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeartbeatConfig {
    /// GPIO number of the heartbeat line (0-29 for RP2040)
    pub pin: u8,
    /// Pulse polarity
    pub polarity: Polarity,
    /// Start with the pin blocked (e.g. shared with a UART)
    pub blocked: bool,
    /// Start with pulses enabled
    pub enabled: bool,
    /// Defaults substituted for zero period/pulse
    pub timing: Timing,
    /// Requested period (ms), 0 = default
    pub period_ms: u32,
    /// Requested pulse width (ms), 0 = default
    pub pulse_ms: u8,
}

impl HeartbeatConfig {
    /// Config for a pin with everything else at its default
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            polarity: Polarity::ActiveHigh,
            blocked: false,
            enabled: true,
            timing: Timing::DEFAULT,
            period_ms: 0,
            pulse_ms: 0,
        }
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_defaults() {
        let timing = Timing::default();
        assert_eq!(timing.period_ms, 15_000);
        assert_eq!(timing.pulse_ms, 10);
    }

    #[test]
    fn test_timing_zero_falls_back() {
        let timing = Timing::new(0, 0);
        assert_eq!(timing, Timing::DEFAULT);

        let timing = Timing::new(2_000, 0);
        assert_eq!(timing.period_ms, 2_000);
        assert_eq!(timing.pulse_ms, DEFAULT_PULSE_MS);
    }

    #[test]
    fn test_resolve() {
        let timing = Timing::new(1_000, 5);
        assert_eq!(timing.resolve_period(0), 1_000);
        assert_eq!(timing.resolve_period(250), 250);
        assert_eq!(timing.resolve_pulse(0), 5);
        assert_eq!(timing.resolve_pulse(200), 200);
    }

    #[test]
    fn test_resolve_with_zeroed_fields() {
        // Built as a literal, bypassing `new`
        let timing = Timing {
            period_ms: 0,
            pulse_ms: 0,
        };
        assert_eq!(timing.resolve_period(0), DEFAULT_PERIOD_MS);
        assert_eq!(timing.resolve_pulse(0), DEFAULT_PULSE_MS);
    }

    #[test]
    fn test_polarity_levels() {
        let high = Polarity::from_reverse(false);
        assert_eq!(high, Polarity::ActiveHigh);
        assert_eq!(high.active_level(), Level::High);
        assert_eq!(high.idle_level(), Level::Low);

        let low = Polarity::from_reverse(true);
        assert_eq!(low, Polarity::ActiveLow);
        assert!(low.is_reverse());
        assert_eq!(low.active_level(), Level::Low);
        assert_eq!(low.idle_level(), Level::High);
    }

    #[test]
    fn test_config_defaults() {
        let config = HeartbeatConfig::new(5);
        assert_eq!(config.pin, 5);
        assert_eq!(config.polarity, Polarity::ActiveHigh);
        assert!(!config.blocked);
        assert!(config.enabled);
        assert_eq!(config.timing, Timing::DEFAULT);
    }
}
