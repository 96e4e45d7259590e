//! Heartbeat task
//!
//! Owns the heartbeat controller and polls it from a ticker. The pulse
//! itself uses the blocking embassy delay: the executor is stalled for the
//! pulse width, which keeps the pulse length exact.

use defmt::*;
use embassy_time::{Delay, Duration, Ticker};

use systole_core::config::HeartbeatConfig;
use systole_core::heartbeat::HeartbeatController;
use systole_core::timer::IntervalTimer;
use systole_hal_rp2040::{EmbassyClock, FlexOutput};

/// Poll interval for the heartbeat timer in milliseconds
pub const POLL_INTERVAL_MS: u64 = 10;

/// Concrete controller type used by the firmware
pub type Heartbeat =
    HeartbeatController<FlexOutput<'static>, Delay, IntervalTimer<EmbassyClock>>;

/// Build the heartbeat controller from config
pub fn build(pin: FlexOutput<'static>, config: &HeartbeatConfig) -> Heartbeat {
    let timer = IntervalTimer::new(EmbassyClock, config.timing.period_ms);
    HeartbeatController::from_config(pin, Delay, timer, config)
}

/// Heartbeat task - starts the heartbeat and runs it forever
#[embassy_executor::task]
pub async fn heartbeat_task(mut heartbeat: Heartbeat, enabled: bool) {
    info!("Heartbeat task started");

    heartbeat.begin(enabled);
    debug!("Heartbeat state: {}", heartbeat.state());

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        if heartbeat.run() {
            trace!("Heartbeat pulse ({} ms)", heartbeat.pulse_ms());
        }
    }
}
