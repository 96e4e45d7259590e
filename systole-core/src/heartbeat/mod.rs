//! Heartbeat generation
//!
//! Emits short pulses on one output line so an external watchdog can see
//! the controller is alive.

pub mod controller;
pub mod state;

pub use controller::HeartbeatController;
pub use state::HeartbeatState;
