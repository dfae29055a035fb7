//! Network bring-up.
//!
//! One bounded attempt to get the station link up: start associating,
//! then poll once per second until the link reports up or the timeout
//! counter runs out. Retrying after a timeout is the supervisor's call.

use core::time::Duration;

use log::{info, warn};

use crate::app::ports::{TimerPort, WifiLink};
use crate::error::NetworkError;

/// Interval between link checks; also the unit of the timeout counter.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Outcome of [`connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bringup {
    Connected,
    TimedOut,
}

/// Bring the link up within `timeout_secs` one-second polls.
///
/// Returns `Connected` immediately, without touching the driver, if the
/// link is already up from a previous session. Driver errors from starting
/// the association are returned as `Err`.
pub async fn connect<L, T>(
    link: &mut L,
    timer: &T,
    ssid: &str,
    password: &str,
    timeout_secs: u32,
) -> Result<Bringup, NetworkError>
where
    L: WifiLink,
    T: TimerPort,
{
    if link.is_connected() {
        info!("WiFi: already connected");
        return Ok(Bringup::Connected);
    }

    info!("WiFi: connecting to '{}' (timeout {}s)", ssid, timeout_secs);
    link.begin_connect(ssid, password)?;

    let mut remaining = timeout_secs;
    while !link.is_connected() && remaining > 0 {
        timer.sleep(POLL_INTERVAL).await;
        remaining -= 1;
    }

    if link.is_connected() {
        info!(
            "WiFi: connected ({})",
            link.link_info().as_deref().unwrap_or("no address info")
        );
        Ok(Bringup::Connected)
    } else {
        warn!("WiFi: failed to connect within {}s", timeout_secs);
        Ok(Bringup::TimedOut)
    }
}

// ───────────────────────────────────────────────────────────────
// Credential validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

pub fn validate_ssid(ssid: &str) -> Result<(), NetworkError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(NetworkError::InvalidSsid);
    }
    Ok(())
}

/// Empty means an open network; otherwise WPA2 needs 8-64 bytes.
pub fn validate_password(password: &str) -> Result<(), NetworkError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(NetworkError::InvalidPassword);
    }
    Ok(())
}
