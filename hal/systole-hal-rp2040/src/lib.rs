//! RP2040-specific HAL for the heartbeat firmware
//!
//! This crate provides RP2040 implementations of the shared `systole-hal`
//! traits, plus RP2040-specific functionality:
//!
//! - Heartbeat output pin (implements `systole_hal::OutputPin`)
//! - Dynamic pin allocation for config-driven setup
//! - Millisecond clock over the embassy time driver (implements `systole_hal::Clock`)

#![no_std]

pub mod gpio;
pub mod pins;
pub mod time;

pub use gpio::FlexOutput;
pub use pins::{PinBank, PinError};
pub use time::EmbassyClock;

// Re-export shared traits from systole-hal for convenience
pub use systole_hal::{Clock, Level, OutputPin};
