//! Configuration types
//!
//! Board-agnostic heartbeat configuration, filled from compiled-in
//! defaults or from the firmware's TOML file.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
