//! Systole - Watchdog Heartbeat Firmware
//!
//! Main firmware binary for RP2040-based boards. Emits periodic short
//! pulses on one GPIO so an external watchdog can tell the board is alive.
//!
//! Named after the contraction phase of the heart beat.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use systole_hal_rp2040::{FlexOutput, PinBank};

mod config;
mod tasks;

/// Embedded default configuration (compiled into firmware)
/// Edit heartbeat.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../heartbeat.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Systole firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config(EMBEDDED_CONFIG);

    let mut pins = PinBank::from_peripherals(p);
    let pin = match pins.take(config.pin) {
        Ok(pin) => pin,
        Err(e) => {
            error!("Heartbeat pin gpio{} unavailable: {}", config.pin, e);
            return;
        }
    };

    let heartbeat = tasks::heartbeat::build(FlexOutput::new(pin), &config);
    info!(
        "Heartbeat on gpio{}: {}, period={}ms, pulse={}ms, blocked={}",
        config.pin,
        heartbeat.polarity(),
        heartbeat.period_ms(),
        heartbeat.pulse_ms(),
        heartbeat.is_blocked()
    );

    // Spawn tasks
    spawner
        .spawn(tasks::heartbeat_task(heartbeat, config.enabled))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
