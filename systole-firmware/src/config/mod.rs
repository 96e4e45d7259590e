//! Configuration loading
//!
//! Parses the embedded `heartbeat.toml` with the `no_std` reader from
//! `systole-core`. The file is also validated by build.rs; if the runtime
//! reader still rejects it, the heartbeat starts with defaults.

use defmt::*;

use systole_core::config::{parse_config, HeartbeatConfig};

/// Heartbeat pin used when the config cannot be parsed
pub const FALLBACK_PIN: u8 = 25;

/// Load the heartbeat configuration
pub fn load_config(toml: &str) -> HeartbeatConfig {
    match parse_config(toml) {
        Ok(config) => {
            info!("Configuration loaded: {}", config);
            config
        }
        Err(e) => {
            warn!(
                "heartbeat.toml parse error ({}), using defaults on gpio{}",
                e, FALLBACK_PIN
            );
            HeartbeatConfig::new(FALLBACK_PIN)
        }
    }
}
