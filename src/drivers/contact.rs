//! Magnetic reed contact on the window frame.
//!
//! The contact is wired to a GPIO input with pull-up: HIGH means the
//! magnet is away and the window is open. No debounce is applied; a
//! bouncing contact produces one edge per observed level change.

use embedded_hal::digital::{Error as _, InputPin};
use log::warn;

use crate::app::state::WindowState;
use crate::error::GpioError;

pub struct ContactSensor<P> {
    pin: P,
}

impl<P: InputPin> ContactSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Sample the input once.
    pub fn read(&mut self) -> Result<WindowState, GpioError> {
        match self.pin.is_high() {
            Ok(high) => Ok(WindowState::from_level(high)),
            Err(e) => {
                warn!("Contact: read failed ({:?})", e.kind());
                Err(GpioError::ReadFailed)
            }
        }
    }
}
