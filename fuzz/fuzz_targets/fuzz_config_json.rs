//! Fuzz target: `AlarmConfig::from_json`
//!
//! Drives the config loader with arbitrary bytes and verifies:
//! - No panics on malformed or oversized input
//! - Anything accepted also passes `validate` and has a non-empty whitelist
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use window_alarm::config::AlarmConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(config) = AlarmConfig::from_json(json) {
        assert!(config.validate().is_ok());
        assert!(!config.whitelist.is_empty());
        assert_ne!(config.sensor_pin, config.led_pin);
        assert!(config.sensor_poll_ms > 0);
    }
});
