//! Device configuration.
//!
//! Loaded once at boot from the JSON bundled into the image and never
//! changed afterwards. Invalid values are rejected, not clamped.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::monitor;
use crate::app::whitelist::Whitelist;
use crate::net;
use crate::pins;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmConfig {
    // --- Failure policy ---
    /// Halt for inspection on failure instead of resetting the device.
    #[serde(default)]
    pub debug_mode: bool,

    // --- Network ---
    pub wifi_ssid: heapless::String<32>,
    /// Empty for an open network.
    #[serde(default)]
    pub wifi_password: heapless::String<64>,
    /// One-second polls allowed for the link to come up.
    #[serde(default = "default_wifi_timeout_secs")]
    pub wifi_timeout_secs: u32,

    // --- Messaging ---
    /// Credential handed to the messaging transport.
    #[serde(default)]
    pub messaging_token: String,
    /// Operators allowed to command the alarm; all of them get alerts.
    pub whitelist: Whitelist,

    // --- Hardware ---
    #[serde(default = "default_sensor_pin")]
    pub sensor_pin: i32,
    #[serde(default = "default_led_pin")]
    pub led_pin: i32,

    // --- Timing ---
    #[serde(default = "default_sensor_poll_ms")]
    pub sensor_poll_ms: u32,
    /// Length of the startup "ready" flash.
    #[serde(default = "default_ready_flash_ms")]
    pub ready_flash_ms: u32,
    /// Production delay before reset after a bring-up timeout.
    #[serde(default = "default_network_reset_delay_secs")]
    pub network_reset_delay_secs: u32,
    /// Production delay before reset after a runtime fault.
    #[serde(default = "default_fault_reset_delay_secs")]
    pub fault_reset_delay_secs: u32,
}

fn default_wifi_timeout_secs() -> u32 {
    10
}
fn default_sensor_pin() -> i32 {
    pins::CONTACT_GPIO
}
fn default_led_pin() -> i32 {
    pins::INDICATOR_GPIO
}
fn default_sensor_poll_ms() -> u32 {
    monitor::POLL_PERIOD.as_millis() as u32
}
fn default_ready_flash_ms() -> u32 {
    500
}
fn default_network_reset_delay_secs() -> u32 {
    5
}
fn default_fault_reset_delay_secs() -> u32 {
    10
}

impl Default for AlarmConfig {
    /// Defaults for every tunable. Credentials and whitelist are empty, so
    /// this does not pass [`validate`](Self::validate) on its own.
    fn default() -> Self {
        Self {
            debug_mode: false,
            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),
            wifi_timeout_secs: default_wifi_timeout_secs(),
            messaging_token: String::new(),
            whitelist: Whitelist::default(),
            sensor_pin: default_sensor_pin(),
            led_pin: default_led_pin(),
            sensor_poll_ms: default_sensor_poll_ms(),
            ready_flash_ms: default_ready_flash_ms(),
            network_reset_delay_secs: default_network_reset_delay_secs(),
            fault_reset_delay_secs: default_fault_reset_delay_secs(),
        }
    }
}

impl AlarmConfig {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        net::validate_ssid(&self.wifi_ssid)
            .map_err(|_| ConfigError::ValidationFailed("wifi_ssid must be 1-32 printable ASCII bytes"))?;
        net::validate_password(&self.wifi_password)
            .map_err(|_| ConfigError::ValidationFailed("wifi_password must be empty or 8-64 bytes"))?;
        if self.whitelist.is_empty() {
            return Err(ConfigError::ValidationFailed("whitelist must name at least one operator"));
        }
        if self.sensor_pin == self.led_pin {
            return Err(ConfigError::ValidationFailed("sensor_pin and led_pin must differ"));
        }
        if self.sensor_poll_ms == 0 {
            return Err(ConfigError::ValidationFailed("sensor_poll_ms must be non-zero"));
        }
        Ok(())
    }

    pub fn sensor_poll_period(&self) -> Duration {
        Duration::from_millis(self.sensor_poll_ms as u64)
    }

    pub fn ready_flash(&self) -> Duration {
        Duration::from_millis(self.ready_flash_ms as u64)
    }

    pub fn network_reset_delay(&self) -> Duration {
        Duration::from_secs(self.network_reset_delay_secs as u64)
    }

    pub fn fault_reset_delay(&self) -> Duration {
        Duration::from_secs(self.fault_reset_delay_secs as u64)
    }
}

/// Errors from [`AlarmConfig::from_json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Not valid JSON, a field has the wrong type, or a list/string is too long.
    Malformed,
    /// A field failed range validation.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "config malformed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
