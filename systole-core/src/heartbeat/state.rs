//! Heartbeat state view
//!
//! The controller tracks two independent flags (blocked/free and
//! enabled/disabled). This enum names the four combinations.

/// Combined heartbeat state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeartbeatState {
    /// Pin free, pulses enabled
    Beating,
    /// Pin free, pulses disabled; line held at idle level
    Resting,
    /// Pin blocked, pulses enabled; resumes beating on free
    BlockedEnabled,
    /// Pin blocked, pulses disabled
    BlockedDisabled,
}

impl HeartbeatState {
    /// Build the state from the two flags
    pub const fn from_flags(blocked: bool, enabled: bool) -> Self {
        match (blocked, enabled) {
            (false, true) => HeartbeatState::Beating,
            (false, false) => HeartbeatState::Resting,
            (true, true) => HeartbeatState::BlockedEnabled,
            (true, false) => HeartbeatState::BlockedDisabled,
        }
    }

    /// Check if a pulse would be emitted in this state
    pub const fn may_beat(self) -> bool {
        matches!(self, HeartbeatState::Beating)
    }

    /// Check if the controller may touch the pin at all
    pub const fn may_drive_pin(self) -> bool {
        matches!(self, HeartbeatState::Beating | HeartbeatState::Resting)
    }

    /// Check if the pin is blocked
    pub const fn is_blocked(self) -> bool {
        matches!(
            self,
            HeartbeatState::BlockedEnabled | HeartbeatState::BlockedDisabled
        )
    }

    /// Check if pulses are enabled
    pub const fn is_enabled(self) -> bool {
        matches!(
            self,
            HeartbeatState::Beating | HeartbeatState::BlockedEnabled
        )
    }
}
