//! Board-agnostic core logic for the heartbeat firmware
//!
//! This crate contains the logic that does not depend on a specific chip:
//!
//! - Heartbeat controller (pulse gating, polarity, period/pulse settings)
//! - Interval timer driving the periodic pulses
//! - Collaborator traits (periodic timer)
//! - Configuration type definitions and `heartbeat.toml` parsing
//! - Lenient text parsing for textual setters
//!
//! # Example
//!
//! ```ignore
//! use systole_core::config::{Polarity, DEFAULT_PERIOD_MS};
//! use systole_core::heartbeat::HeartbeatController;
//! use systole_core::timer::IntervalTimer;
//!
//! let timer = IntervalTimer::new(clock, DEFAULT_PERIOD_MS);
//! let mut heartbeat = HeartbeatController::new(pin, delay, timer, Polarity::ActiveHigh, false);
//! heartbeat.begin(true);
//! loop {
//!     heartbeat.run();
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod heartbeat;
pub mod text;
pub mod timer;
pub mod traits;

pub use config::{HeartbeatConfig, Polarity, Timing};
pub use heartbeat::{HeartbeatController, HeartbeatState};
pub use timer::IntervalTimer;
pub use traits::PeriodicTimer;
