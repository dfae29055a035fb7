//! Hard device reset.
//!
//! On ESP-IDF this is `esp_restart()` and never returns. The host
//! simulation emulates a reboot by re-executing the current binary.

use log::warn;

use crate::app::ports::ResetPort;

#[derive(Default)]
pub struct SystemReset;

impl SystemReset {
    pub fn new() -> Self {
        Self
    }
}

impl ResetPort for SystemReset {
    #[cfg(target_os = "espidf")]
    fn reset(&mut self) {
        warn!("Reset: restarting device");
        // SAFETY: esp_restart has no preconditions; it does not return.
        unsafe { esp_idf_svc::sys::esp_restart() }
    }

    #[cfg(all(not(target_os = "espidf"), unix))]
    fn reset(&mut self) {
        use std::os::unix::process::CommandExt;

        warn!("Reset(sim): re-executing to emulate a device reset");
        let exe = match std::env::current_exe() {
            Ok(exe) => exe,
            Err(e) => {
                log::error!("Reset(sim): cannot locate own binary: {}", e);
                return;
            }
        };
        // exec only returns on failure.
        let err = std::process::Command::new(exe)
            .args(std::env::args_os().skip(1))
            .exec();
        log::error!("Reset(sim): exec failed: {}", err);
    }

    #[cfg(all(not(target_os = "espidf"), not(unix)))]
    fn reset(&mut self) {
        warn!("Reset(sim): no reboot emulation on this host, returning");
    }
}
