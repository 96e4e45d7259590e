//! Collaborator traits
//!
//! These traits define the interface between the heartbeat logic and the
//! pieces it consumes but does not own the implementation of.

pub mod timer;

pub use timer::PeriodicTimer;
