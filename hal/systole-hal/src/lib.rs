//! Systole Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the heartbeat logic is written
//! against. Chip-specific HALs (currently RP2040) implement them, so the
//! same controller runs unchanged on the target and inside host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  systole-firmware / host tests          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  systole-core (heartbeat controller)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  systole-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ systole-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output that can (re)claim its pin mode
//! - [`time::Clock`] - Free-running millisecond counter
//!
//! Blocking delays are not redefined here; use
//! [`embedded_hal::delay::DelayNs`](https://docs.rs/embedded-hal).

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{Level, OutputPin};
pub use time::Clock;
