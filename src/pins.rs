//! Default GPIO assignments for the alarm board.
//!
//! The configuration file may override both; these are what
//! [`AlarmConfig::default`](crate::config::AlarmConfig) uses.

/// Magnetic reed contact on the window frame, internal pull-up.
/// HIGH = window open (magnet away), LOW = closed.
pub const CONTACT_GPIO: i32 = 16;

/// Status LED used as the breach indicator (active HIGH).
pub const INDICATOR_GPIO: i32 = 2;
