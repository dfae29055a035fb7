//! Window Alarm Firmware: Main Entry Point
//!
//! Hexagonal architecture on a cooperative single-thread executor.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  WifiAdapter    ReactorTimer   SystemReset   transport bridge  │
//! │  (WifiLink)     (TimerPort)    (ResetPort)   (UpdateSource +   │
//! │                                               Messenger)       │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  Supervisor: bring-up · fault barrier                  │    │
//! │  │    SensorMonitor (100 ms)  ║  CommandDispatcher        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use window_alarm::adapters::console_wire::{ConsoleReader, ConsoleWriter};
use window_alarm::adapters::timer::ReactorTimer;
use window_alarm::adapters::transport;
use window_alarm::adapters::wifi::WifiAdapter;
use window_alarm::config::AlarmConfig;
use window_alarm::drivers::reset::SystemReset;
use window_alarm::supervisor::{Exit, Supervisor};

/// Configuration bundled by `build.rs`.
const BUNDLED_CONFIG: &str = include_str!(concat!(env!("OUT_DIR"), "/alarm.json"));

/// Simulated association latency for host runs.
#[cfg(not(target_os = "espidf"))]
const SIM_WIFI_LATENCY: std::time::Duration = std::time::Duration::from_millis(1500);

fn main() -> Result<()> {
    // ── 1. Bootstrap + logging ────────────────────────────────
    init_logging()?;

    let config = AlarmConfig::from_json(BUNDLED_CONFIG).context("bundled alarm configuration")?;

    info!("╔══════════════════════════════════════╗");
    info!("║  WindowAlarm v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
    info!("Debug mode: {}", config.debug_mode);
    info!("Operators: {}", config.whitelist.len());
    log_free_heap();

    // ── 2. Peripherals ────────────────────────────────────────
    let (mut link, sensor, indicator) = peripherals(&config)?;

    // ── 3. Supervised session ─────────────────────────────────
    let mut supervisor = Supervisor::new(config, ReactorTimer::new(), SystemReset::new());
    let exit = futures_lite::future::block_on(supervisor.run(&mut link, sensor, indicator, |_token| {
        // The console wire needs no credential; a network client would
        // authenticate with the token here.
        Ok(transport::start(ConsoleReader::stdin(), ConsoleWriter::stdout())?)
    }));

    match exit {
        Exit::Halted => info!("Halted; waiting for manual inspection"),
        Exit::Reset => info!("Reset requested but the device did not restart"),
    }
    Ok(())
}

// ── Platform glue ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn init_logging() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn init_logging() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Ok(())
}

#[cfg(target_os = "espidf")]
fn log_free_heap() {
    // SAFETY: read-only query of the heap allocator.
    let free = unsafe { esp_idf_svc::sys::esp_get_free_heap_size() };
    info!("Free heap: {} bytes", free);
}

#[cfg(not(target_os = "espidf"))]
fn log_free_heap() {
    log::debug!("Free heap: not tracked on host");
}

#[cfg(target_os = "espidf")]
fn peripherals(
    config: &AlarmConfig,
) -> Result<(
    WifiAdapter,
    esp_idf_svc::hal::gpio::PinDriver<'static, esp_idf_svc::hal::gpio::AnyIOPin, esp_idf_svc::hal::gpio::Input>,
    esp_idf_svc::hal::gpio::PinDriver<'static, esp_idf_svc::hal::gpio::AnyIOPin, esp_idf_svc::hal::gpio::Output>,
)> {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::gpio::{AnyIOPin, PinDriver, Pull};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // SAFETY: both pin numbers come from validated config, differ from
    // each other, and are not claimed by any other driver.
    let (contact_pin, led_pin) = unsafe { (AnyIOPin::new(config.sensor_pin), AnyIOPin::new(config.led_pin)) };

    let mut sensor = PinDriver::input(contact_pin)?;
    // Reed switch to ground: closed pulls low, open floats high.
    sensor.set_pull(Pull::Up)?;
    let indicator = PinDriver::output(led_pin)?;

    let link = WifiAdapter::new(peripherals.modem, sysloop, nvs)
        .map_err(|e| anyhow::anyhow!("WiFi init failed: {}", e))?;
    info!("GPIO: contact on {}, indicator on {}", config.sensor_pin, config.led_pin);
    Ok((link, sensor, indicator))
}

#[cfg(not(target_os = "espidf"))]
fn peripherals(
    config: &AlarmConfig,
) -> Result<(
    WifiAdapter,
    window_alarm::drivers::sim_gpio::SimContact,
    window_alarm::drivers::sim_gpio::SimLed,
)> {
    use window_alarm::drivers::sim_gpio::{SimContact, SimLed};

    info!(
        "GPIO(sim): contact on {}, indicator on {}; type 'sim open' / 'sim close' to move the window",
        config.sensor_pin, config.led_pin
    );
    info!("Console: send commands as '<sender_id> <text>', e.g. '123456789 /status'");
    Ok((WifiAdapter::new(SIM_WIFI_LATENCY), SimContact, SimLed::default()))
}
