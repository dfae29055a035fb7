//! Single-colour breach indicator LED.
//!
//! Tracks the last commanded level so the core can report it without
//! reading the output back.

use embedded_hal::digital::{Error as _, OutputPin};
use log::warn;

use crate::error::GpioError;

pub struct Indicator<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> Indicator<P> {
    /// Wrap an output pin. The pin level is left as the board brought it up.
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    pub fn on(&mut self) -> Result<(), GpioError> {
        self.set(true)
    }

    pub fn off(&mut self) -> Result<(), GpioError> {
        self.set(false)
    }

    pub fn set(&mut self, lit: bool) -> Result<(), GpioError> {
        let res = if lit { self.pin.set_high() } else { self.pin.set_low() };
        res.map_err(|e| {
            warn!("Indicator: write failed ({:?})", e.kind());
            GpioError::WriteFailed
        })?;
        self.lit = lit;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.lit
    }
}
