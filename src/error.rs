//! Unified error types for the window alarm firmware.
//!
//! Every fallible operation funnels into [`Error`] so the supervisor's
//! fault barrier handles a single type. All variants are `Copy`.
//!
//! Two conditions that look like failures are deliberately *not* errors:
//! a WiFi bring-up timeout is the [`Bringup::TimedOut`](crate::net::Bringup)
//! outcome, and a message from an unknown sender is the
//! [`Dispatch::Denied`](crate::app::dispatcher::Dispatch) outcome.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Anything that escapes a task ends up here and is handed to the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// WiFi driver or credential problem during bring-up.
    Network(NetworkError),
    /// The contact input or indicator output failed.
    Gpio(GpioError),
    /// The messaging transport failed or could not be started.
    Transport(TransportError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "network: {e}"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Network errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkError {
    /// SSID must be 1-32 printable ASCII bytes.
    InvalidSsid,
    /// Password must be empty (open network) or 8-64 bytes.
    InvalidPassword,
    /// The WiFi driver rejected a call; carries the driver return code.
    Driver(i32),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::Driver(rc) => write!(f, "WiFi driver error (rc={rc})"),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<NetworkError> for Error {
    fn from(e: NetworkError) -> Self {
        Self::Network(e)
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Sampling the contact input failed.
    ReadFailed,
    /// Driving the indicator output failed.
    WriteFailed,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "contact input read failed"),
            Self::WriteFailed => write!(f, "indicator output write failed"),
        }
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The inbound side reached end-of-stream.
    Closed,
    /// Reading from the wire failed.
    ReadFailed,
    /// Writing to the wire failed.
    WriteFailed,
    /// A bridge thread could not be spawned.
    SpawnFailed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "message stream closed"),
            Self::ReadFailed => write!(f, "wire read failed"),
            Self::WriteFailed => write!(f, "wire write failed"),
            Self::SpawnFailed => write!(f, "bridge thread spawn failed"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
