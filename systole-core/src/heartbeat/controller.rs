//! Heartbeat controller
//!
//! Drives one output line with short pulses for an external watchdog.
//!
//! Two independent flags gate the line:
//! - **blocked**: the pin belongs to someone else (e.g. it doubles as a UART
//!   TX pin). While blocked the controller never writes the pin or changes
//!   its mode.
//! - **enabled**: pulses are permitted. Disabling parks the line at the
//!   idle level.
//!
//! A pulse is emitted only when the pin is free and pulses are enabled.
//! Pulses are blocking: the caller is stalled for the pulse width so the
//! line really spends that long at the active level.

use embedded_hal::delay::DelayNs;
use systole_hal::{Level, OutputPin};

use super::state::HeartbeatState;
use crate::config::{HeartbeatConfig, Polarity, Timing};
use crate::text::parse_leading_u32;
use crate::traits::PeriodicTimer;

/// Heartbeat pulse generator
///
/// Generic over the output pin, a blocking delay and the periodic timer
/// that schedules the regular pulses.
pub struct HeartbeatController<P, D, T> {
    pin: P,
    delay: D,
    timer: T,
    /// Defaults substituted for zero period/pulse
    timing: Timing,
    /// Fixed at construction
    polarity: Polarity,
    pulse_ms: u8,
    enabled: bool,
    blocked: bool,
}

impl<P, D, T> HeartbeatController<P, D, T>
where
    P: OutputPin,
    D: DelayNs,
    T: PeriodicTimer,
{
    /// Create a controller with the compiled-in timing defaults
    ///
    /// The pin is not touched until [`begin`](Self::begin) or
    /// [`free`](Self::free).
    pub fn new(pin: P, delay: D, timer: T, polarity: Polarity, blocked: bool) -> Self {
        Self::with_timing(pin, delay, timer, polarity, blocked, Timing::DEFAULT)
    }

    /// Create a controller with custom timing defaults
    pub fn with_timing(
        pin: P,
        delay: D,
        mut timer: T,
        polarity: Polarity,
        blocked: bool,
        timing: Timing,
    ) -> Self {
        let timing = Timing::new(timing.period_ms, timing.pulse_ms);
        timer.set_period(timing.period_ms);

        Self {
            pin,
            delay,
            timer,
            timing,
            polarity,
            pulse_ms: timing.pulse_ms,
            enabled: false,
            blocked,
        }
    }

    /// Create a controller from a complete heartbeat config
    ///
    /// Applies the configured period and pulse width; `config.enabled` is
    /// left for the caller to pass to [`begin`](Self::begin).
    pub fn from_config(pin: P, delay: D, timer: T, config: &HeartbeatConfig) -> Self {
        let mut controller = Self::with_timing(
            pin,
            delay,
            timer,
            config.polarity,
            config.blocked,
            config.timing,
        );
        controller.set_period_ms(config.period_ms);
        controller.set_pulse_ms(config.pulse_ms);
        controller
    }

    /// Start the heartbeat
    ///
    /// Claims the pin as output if it is free, then applies the enabled
    /// flag. Enabling emits the initial pulse, so the watchdog sees a sign
    /// of life right at startup; disabling parks the line at idle.
    ///
    /// The pin mode is set before the first write, and exactly one pulse
    /// attempt is made.
    pub fn begin(&mut self, enabled: bool) {
        if self.state().may_drive_pin() {
            self.pin.set_as_output();
        }
        if enabled {
            self.enable();
        } else {
            self.disable();
        }
    }

    /// Stop touching the pin altogether
    pub fn block(&mut self) {
        self.blocked = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("Heartbeat pin blocked");
    }

    /// Take the pin back
    ///
    /// The pin is always switched to output mode again, as its owner while
    /// blocked may have reconfigured it.
    pub fn free(&mut self) {
        self.blocked = false;
        self.pin.set_as_output();
        #[cfg(feature = "defmt")]
        defmt::debug!("Heartbeat pin freed");
    }

    /// Enable pulses and emit one right away
    ///
    /// Calling this repeatedly forces extra pulses outside the period.
    pub fn enable(&mut self) {
        self.enabled = true;
        self.beat();
    }

    /// Disable pulses and park the line at the idle level (if free)
    pub fn disable(&mut self) {
        self.enabled = false;
        if self.state().may_drive_pin() {
            self.pin.set_level(self.idle_level());
        }
    }

    /// Process the heartbeat; call from the application loop
    ///
    /// Emits a pulse each time the period elapses. Returns `true` if a pulse
    /// was put on the line.
    pub fn run(&mut self) -> bool {
        if self.timer.has_elapsed() {
            #[cfg(feature = "defmt")]
            defmt::trace!("Heartbeat");
            self.beat()
        } else {
            false
        }
    }

    /// Emit one pulse if the pin is free and pulses are enabled
    fn beat(&mut self) -> bool {
        if !self.state().may_beat() {
            return false;
        }

        self.pin.set_level(self.active_level());
        self.delay.delay_ms(u32::from(self.pulse_ms));
        self.pin.set_level(self.idle_level());
        true
    }

    // Setters

    /// Set the heartbeat period in milliseconds (0 = default)
    pub fn set_period_ms(&mut self, period_ms: u32) {
        self.timer.set_period(self.timing.resolve_period(period_ms));
    }

    /// Restore the default heartbeat period
    pub fn reset_period(&mut self) {
        self.set_period_ms(0);
    }

    /// Set the heartbeat period from text in whole seconds
    ///
    /// Unparseable or negative text selects the default period.
    pub fn set_period_from_seconds_text(&mut self, seconds: &str) {
        let period_ms = parse_leading_u32(seconds).saturating_mul(1000);
        self.set_period_ms(period_ms);
    }

    /// Set the pulse width in milliseconds (0 = default)
    pub fn set_pulse_ms(&mut self, pulse_ms: u8) {
        self.pulse_ms = self.timing.resolve_pulse(pulse_ms);
    }

    /// Restore the default pulse width
    pub fn reset_pulse(&mut self) {
        self.set_pulse_ms(0);
    }

    /// Set the pulse width from text in milliseconds
    ///
    /// Values above 255 ms are clamped; unparseable text selects the default.
    pub fn set_pulse_from_text(&mut self, millis: &str) {
        let pulse_ms = parse_leading_u32(millis).min(u32::from(u8::MAX)) as u8;
        self.set_pulse_ms(pulse_ms);
    }

    // Getters

    /// Check if the pin is blocked
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Check if the pin is free
    pub fn is_free(&self) -> bool {
        !self.is_blocked()
    }

    /// Check if pulses are enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if pulses are disabled
    pub fn is_disabled(&self) -> bool {
        !self.is_enabled()
    }

    /// Heartbeat period in milliseconds
    pub fn period_ms(&self) -> u32 {
        self.timer.period()
    }

    /// Pulse width in milliseconds
    pub fn pulse_ms(&self) -> u8 {
        self.pulse_ms
    }

    /// Combined blocked/enabled state
    pub fn state(&self) -> HeartbeatState {
        HeartbeatState::from_flags(self.blocked, self.enabled)
    }

    /// Pulse polarity
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Level asserted during a pulse
    pub fn active_level(&self) -> Level {
        self.polarity.active_level()
    }

    /// Level held between pulses
    pub fn idle_level(&self) -> Level {
        self.polarity.idle_level()
    }

    /// Consume the controller and return its collaborators
    pub fn release(self) -> (P, D, T) {
        (self.pin, self.delay, self.timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use heapless::Vec;

    /// Everything the controller does to the outside world, in order
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Output,
        Write(Level),
        Wait(u32),
    }

    type Log = RefCell<Vec<Op, 64>>;

    struct MockPin<'a> {
        log: &'a Log,
    }

    impl OutputPin for MockPin<'_> {
        fn set_as_output(&mut self) {
            self.log.borrow_mut().push(Op::Output).unwrap();
        }

        fn set_level(&mut self, level: Level) {
            self.log.borrow_mut().push(Op::Write(level)).unwrap();
        }
    }

    struct MockDelay<'a> {
        log: &'a Log,
    }

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Op::Wait(ns / 1_000_000)).unwrap();
        }

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Op::Wait(ms)).unwrap();
        }
    }

    /// Timer that reports elapsed only when told to
    struct MockTimer<'a> {
        period: u32,
        due: &'a Cell<bool>,
    }

    impl PeriodicTimer for MockTimer<'_> {
        fn set_period(&mut self, period_ms: u32) {
            self.period = period_ms;
        }

        fn period(&self) -> u32 {
            self.period
        }

        fn has_elapsed(&mut self) -> bool {
            self.due.replace(false)
        }
    }

    type TestController<'a> = HeartbeatController<MockPin<'a>, MockDelay<'a>, MockTimer<'a>>;

    fn controller<'a>(
        log: &'a Log,
        due: &'a Cell<bool>,
        reverse: bool,
        blocked: bool,
    ) -> TestController<'a> {
        HeartbeatController::new(
            MockPin { log },
            MockDelay { log },
            MockTimer { period: 0, due },
            Polarity::from_reverse(reverse),
            blocked,
        )
    }

    fn ops(log: &Log) -> Vec<Op, 64> {
        log.borrow().clone()
    }

    #[test]
    fn test_construction_does_not_touch_pin() {
        let log = Log::default();
        let due = Cell::new(false);
        let hb = controller(&log, &due, false, false);

        assert!(ops(&log).is_empty());
        assert_eq!(hb.period_ms(), 15_000);
        assert_eq!(hb.pulse_ms(), 10);
        assert!(hb.is_disabled());
    }

    #[test]
    fn test_levels_follow_polarity() {
        let log = Log::default();
        let due = Cell::new(false);

        let hb = controller(&log, &due, false, false);
        assert_eq!(hb.active_level(), Level::High);
        assert_eq!(hb.idle_level(), Level::Low);

        let hb = controller(&log, &due, true, false);
        assert_eq!(hb.active_level(), Level::Low);
        assert_eq!(hb.idle_level(), Level::High);
    }

    #[test]
    fn test_begin_enabled_emits_pulse() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, false, false);

        hb.begin(true);

        assert_eq!(
            ops(&log).as_slice(),
            &[
                Op::Output,
                Op::Write(Level::High),
                Op::Wait(10),
                Op::Write(Level::Low),
            ]
        );
        assert!(hb.is_enabled());
        assert!(!hb.is_blocked());
        assert_eq!(hb.state(), HeartbeatState::Beating);
    }

    #[test]
    fn test_begin_blocked_reverse_is_silent() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, true, true);

        hb.begin(true);

        assert!(ops(&log).is_empty());
        assert!(hb.is_blocked());
        assert!(hb.is_enabled());
        assert_eq!(hb.state(), HeartbeatState::BlockedEnabled);
    }

    #[test]
    fn test_begin_disabled_parks_line() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, true, false);

        hb.begin(false);

        assert_eq!(
            ops(&log).as_slice(),
            &[Op::Output, Op::Write(Level::High)]
        );
        assert!(hb.is_disabled());
        assert_eq!(hb.state(), HeartbeatState::Resting);
    }

    #[test]
    fn test_disable_writes_idle_level() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, false, false);
        hb.begin(true);
        log.borrow_mut().clear();

        hb.disable();
        assert_eq!(ops(&log).as_slice(), &[Op::Write(Level::Low)]);

        // No pulse while disabled
        due.set(true);
        assert!(!hb.run());
        assert_eq!(ops(&log).len(), 1);
    }

    #[test]
    fn test_enable_forces_pulse() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, true, false);
        hb.begin(false);
        log.borrow_mut().clear();

        hb.enable();
        assert_eq!(
            ops(&log).as_slice(),
            &[Op::Write(Level::Low), Op::Wait(10), Op::Write(Level::High)]
        );

        // Enabling again forces another pulse
        hb.enable();
        assert_eq!(ops(&log).len(), 6);
    }

    #[test]
    fn test_blocked_suppresses_everything() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, false, false);
        hb.begin(true);
        log.borrow_mut().clear();

        hb.block();
        hb.enable();
        hb.disable();
        hb.enable();
        due.set(true);
        assert!(!hb.run());
        assert!(ops(&log).is_empty());

        hb.free();
        assert_eq!(ops(&log).as_slice(), &[Op::Output]);

        due.set(true);
        assert!(hb.run());
        assert_eq!(
            ops(&log).as_slice(),
            &[
                Op::Output,
                Op::Write(Level::High),
                Op::Wait(10),
                Op::Write(Level::Low),
            ]
        );
    }

    #[test]
    fn test_free_reclaims_even_when_disabled() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, false, true);
        hb.begin(false);
        assert!(ops(&log).is_empty());

        hb.free();
        assert_eq!(ops(&log).as_slice(), &[Op::Output]);
        assert_eq!(hb.state(), HeartbeatState::Resting);
    }

    #[test]
    fn test_run_only_on_elapsed() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, false, false);
        hb.begin(true);
        log.borrow_mut().clear();

        for _ in 0..5 {
            assert!(!hb.run());
        }
        assert!(ops(&log).is_empty());

        due.set(true);
        assert!(hb.run());
        assert_eq!(ops(&log).len(), 3);

        // Timer consumed the elapsed report
        assert!(!hb.run());
        assert_eq!(ops(&log).len(), 3);
    }

    #[test]
    fn test_pulse_width_used_for_wait() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, false, false);
        hb.set_pulse_ms(50);
        hb.begin(true);

        assert_eq!(ops(&log)[2], Op::Wait(50));
    }

    #[test]
    fn test_period_setters() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, false, false);

        hb.set_period_ms(5_000);
        assert_eq!(hb.period_ms(), 5_000);

        hb.set_period_ms(0);
        assert_eq!(hb.period_ms(), 15_000);

        hb.set_period_ms(5_000);
        hb.reset_period();
        assert_eq!(hb.period_ms(), 15_000);

        hb.set_period_from_seconds_text("3");
        assert_eq!(hb.period_ms(), 3_000);

        hb.set_period_from_seconds_text("garbage");
        assert_eq!(hb.period_ms(), 15_000);

        hb.set_period_from_seconds_text("-4");
        assert_eq!(hb.period_ms(), 15_000);
    }

    #[test]
    fn test_period_text_saturates() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, false, false);

        hb.set_period_from_seconds_text("5000000");
        assert_eq!(hb.period_ms(), u32::MAX);
    }

    #[test]
    fn test_pulse_setters() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, false, false);

        hb.set_pulse_ms(50);
        assert_eq!(hb.pulse_ms(), 50);

        hb.set_pulse_ms(0);
        assert_eq!(hb.pulse_ms(), 10);

        hb.set_pulse_ms(50);
        hb.reset_pulse();
        assert_eq!(hb.pulse_ms(), 10);

        hb.set_pulse_from_text("25");
        assert_eq!(hb.pulse_ms(), 25);

        hb.set_pulse_from_text("1000");
        assert_eq!(hb.pulse_ms(), 255);

        hb.set_pulse_from_text("nope");
        assert_eq!(hb.pulse_ms(), 10);
    }

    #[test]
    fn test_custom_timing_defaults() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = HeartbeatController::with_timing(
            MockPin { log: &log },
            MockDelay { log: &log },
            MockTimer {
                period: 0,
                due: &due,
            },
            Polarity::ActiveHigh,
            false,
            Timing::new(1_000, 2),
        );

        assert_eq!(hb.period_ms(), 1_000);
        assert_eq!(hb.pulse_ms(), 2);

        hb.set_period_ms(300);
        hb.reset_period();
        assert_eq!(hb.period_ms(), 1_000);
    }

    #[test]
    fn test_from_config() {
        let log = Log::default();
        let due = Cell::new(false);
        let config = HeartbeatConfig {
            polarity: Polarity::ActiveLow,
            blocked: true,
            period_ms: 2_500,
            pulse_ms: 40,
            ..HeartbeatConfig::new(5)
        };
        let hb = HeartbeatController::from_config(
            MockPin { log: &log },
            MockDelay { log: &log },
            MockTimer {
                period: 0,
                due: &due,
            },
            &config,
        );

        assert_eq!(hb.polarity(), Polarity::ActiveLow);
        assert!(hb.is_blocked());
        assert_eq!(hb.period_ms(), 2_500);
        assert_eq!(hb.pulse_ms(), 40);
        assert!(ops(&log).is_empty());
    }

    #[test]
    fn test_release_returns_parts() {
        let log = Log::default();
        let due = Cell::new(false);
        let mut hb = controller(&log, &due, false, false);
        hb.set_period_ms(4_000);

        let (_pin, _delay, timer) = hb.release();
        assert_eq!(timer.period(), 4_000);
    }
}
