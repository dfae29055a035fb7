//! Simulated GPIO for host builds.
//!
//! The contact level lives in a static so the console wire can flip it
//! (`sim open` / `sim close`) while the monitor task samples it. The LED
//! only logs level changes.

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use log::info;

static SIM_CONTACT_OPEN: AtomicBool = AtomicBool::new(false);

pub fn sim_set_contact_open(open: bool) {
    SIM_CONTACT_OPEN.store(open, Ordering::Relaxed);
}

/// Contact input backed by [`sim_set_contact_open`].
pub struct SimContact;

impl ErrorType for SimContact {
    type Error = Infallible;
}

impl InputPin for SimContact {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(SIM_CONTACT_OPEN.load(Ordering::Relaxed))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!SIM_CONTACT_OPEN.load(Ordering::Relaxed))
    }
}

/// Indicator output that logs its level.
#[derive(Default)]
pub struct SimLed {
    lit: bool,
}

impl ErrorType for SimLed {
    type Error = Infallible;
}

impl OutputPin for SimLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.lit {
            info!("LED(sim): off");
        }
        self.lit = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.lit {
            info!("LED(sim): on");
        }
        self.lit = true;
        Ok(())
    }
}
