//! Alarm state: the arm flag and the last sampled window position.

use core::fmt;

/// Position of the monitored window as reported by the contact input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Open,
    Closed,
}

impl WindowState {
    /// Map a raw input level to a window position (active-high = open).
    pub const fn from_level(high: bool) -> Self {
        if high { Self::Open } else { Self::Closed }
    }

    /// Label used in status replies.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shared alarm state.
///
/// `last_window` always holds the most recent sample, whether or not the
/// system is armed. Never persisted: every boot starts disarmed with a fresh
/// read of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmState {
    pub armed: bool,
    pub last_window: WindowState,
}

impl AlarmState {
    /// Fresh, disarmed state seeded from the sensor's actual initial reading.
    pub const fn new(initial: WindowState) -> Self {
        Self {
            armed: false,
            last_window: initial,
        }
    }

    pub const fn armed_label(&self) -> &'static str {
        if self.armed { "ARMED" } else { "DISARMED" }
    }
}
