//! WiFi station-mode adapter.
//!
//! Implements [`WifiLink`], the port used by network bring-up.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation that reports the link up after a
//!   fixed association latency.

use log::info;

use crate::app::ports::WifiLink;
use crate::error::NetworkError;
use crate::net::{validate_password, validate_ssid};

// ───────────────────────────────────────────────────────────────
// ESP-IDF
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct WifiAdapter {
    wifi: esp_idf_svc::wifi::EspWifi<'static>,
}

#[cfg(target_os = "espidf")]
impl WifiAdapter {
    pub fn new(
        modem: esp_idf_svc::hal::modem::Modem,
        sysloop: esp_idf_svc::eventloop::EspSystemEventLoop,
        nvs: esp_idf_svc::nvs::EspDefaultNvsPartition,
    ) -> Result<Self, NetworkError> {
        let wifi = esp_idf_svc::wifi::EspWifi::new(modem, sysloop, Some(nvs))
            .map_err(|e| NetworkError::Driver(e.code()))?;
        Ok(Self { wifi })
    }
}

#[cfg(target_os = "espidf")]
impl WifiLink for WifiAdapter {
    fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }

    fn begin_connect(&mut self, ssid: &str, password: &str) -> Result<(), NetworkError> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

        validate_ssid(ssid)?;
        validate_password(password)?;

        let auth_method = if password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: ssid.try_into().map_err(|_| NetworkError::InvalidSsid)?,
            password: password.try_into().map_err(|_| NetworkError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });

        let driver = |e: esp_idf_svc::sys::EspError| NetworkError::Driver(e.code());
        self.wifi.set_configuration(&config).map_err(driver)?;
        if !self.wifi.is_started().map_err(driver)? {
            self.wifi.start().map_err(driver)?;
        }
        // Non-blocking: association proceeds in the WiFi task.
        self.wifi.connect().map_err(driver)?;
        info!("WiFi: association started");
        Ok(())
    }

    fn link_info(&self) -> Option<String> {
        let ip = self.wifi.sta_netif().get_ip_info().ok()?;
        Some(format!("ip={} gw={}", ip.ip, ip.subnet.gateway))
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub struct WifiAdapter {
    latency: std::time::Duration,
    started: Option<std::time::Instant>,
}

#[cfg(not(target_os = "espidf"))]
impl WifiAdapter {
    /// Simulated link that comes up `latency` after `begin_connect`.
    pub fn new(latency: std::time::Duration) -> Self {
        Self {
            latency,
            started: None,
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl WifiLink for WifiAdapter {
    fn is_connected(&self) -> bool {
        self.started
            .is_some_and(|t| t.elapsed() >= self.latency)
    }

    fn begin_connect(&mut self, ssid: &str, password: &str) -> Result<(), NetworkError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        info!("WiFi(sim): associating with '{}' ({}ms latency)", ssid, self.latency.as_millis());
        self.started = Some(std::time::Instant::now());
        Ok(())
    }

    fn link_info(&self) -> Option<String> {
        self.is_connected().then(|| "ip=127.0.0.1 (sim)".to_string())
    }
}
