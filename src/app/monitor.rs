//! Sensor monitor: edge-triggered window state machine.
//!
//! ```text
//!              sample == last            sample != last
//!   ┌──────────────────────────┐   ┌───────────────────────────────────┐
//!   │ Steady: nothing happens  │   │ last_window := sample, then       │
//!   └──────────────────────────┘   │  armed  & Open   → LED on, alert  │
//!                                  │  armed  & Closed → LED off        │
//!                                  │  disarmed        → no side effect │
//!                                  └───────────────────────────────────┘
//! ```
//!
//! The loop samples every ~100 ms: fast enough for a human opening a
//! window, slow enough not to spin a battery-powered board. There is no
//! debounce; only level changes between consecutive samples count.

use core::cell::RefCell;
use core::convert::Infallible;
use core::time::Duration;
use std::rc::Rc;

use embedded_hal::digital::{InputPin, OutputPin};
use log::{info, warn};

use super::notifier::Notifier;
use super::ports::{AlarmControl, Messenger, TimerPort};
use super::state::{AlarmState, WindowState};
use crate::drivers::contact::ContactSensor;
use crate::drivers::indicator::Indicator;
use crate::error::Result;

/// Default sampling period.
pub const POLL_PERIOD: Duration = Duration::from_millis(100);

/// Text sent to every operator on a breach.
pub const ALERT_TEXT: &str = "⚠️ ALERT: window opened!";

/// What a single sampling cycle observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// Same level as the previous sample.
    Steady,
    /// Window opened while armed: indicator is on, operators must be alerted.
    Breach,
    /// Window closed while armed: indicator cleared.
    Restored,
    /// Level changed while disarmed; recorded silently.
    Changed(WindowState),
}

/// Owns the contact input, the indicator and the alarm state.
pub struct SensorMonitor<S, L> {
    sensor: ContactSensor<S>,
    indicator: Indicator<L>,
    state: AlarmState,
}

impl<S: InputPin, L: OutputPin> SensorMonitor<S, L> {
    /// Seed the state from an actual read of the contact; it is never
    /// assumed closed.
    pub fn new(sensor: S, indicator: L) -> Result<Self> {
        let mut sensor = ContactSensor::new(sensor);
        let initial = sensor.read()?;
        info!("Monitor: initial window state {}", initial);
        Ok(Self {
            sensor,
            indicator: Indicator::new(indicator),
            state: AlarmState::new(initial),
        })
    }

    /// Run one sampling cycle.
    ///
    /// `last_window` is updated before the result is returned, so any
    /// notification for an edge is sent after the state reflects it.
    pub fn poll(&mut self) -> Result<Cycle> {
        let sample = self.sensor.read()?;
        if sample == self.state.last_window {
            return Ok(Cycle::Steady);
        }
        self.state.last_window = sample;

        if !self.state.armed {
            return Ok(Cycle::Changed(sample));
        }

        match sample {
            WindowState::Open => {
                warn!("ALERT! Window open");
                self.indicator.on()?;
                Ok(Cycle::Breach)
            }
            WindowState::Closed => {
                info!("Window closed");
                self.indicator.off()?;
                Ok(Cycle::Restored)
            }
        }
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    pub fn indicator_on(&self) -> bool {
        self.indicator.is_on()
    }

    /// Drive the indicator directly (ready flash at startup).
    pub fn set_indicator(&mut self, lit: bool) -> Result<()> {
        Ok(self.indicator.set(lit)?)
    }
}

impl<S: InputPin, L: OutputPin> AlarmControl for SensorMonitor<S, L> {
    fn arm(&mut self) {
        self.state.armed = true;
    }

    fn disarm(&mut self) -> Result<()> {
        self.state.armed = false;
        Ok(self.indicator.off()?)
    }

    fn is_armed(&self) -> bool {
        self.state.armed
    }

    fn window_state(&self) -> WindowState {
        self.state.last_window
    }
}

/// Monitor task body. Runs until the contact or indicator fails; the error
/// is left for the supervisor.
///
/// The `RefCell` borrow covers one `poll()` only and is released before the
/// notification and the sleep, so the dispatcher task never observes a
/// half-finished cycle.
pub async fn run<S, L, M, T>(
    monitor: Rc<RefCell<SensorMonitor<S, L>>>,
    notifier: Notifier<M>,
    timer: T,
    period: Duration,
) -> Result<Infallible>
where
    S: InputPin,
    L: OutputPin,
    M: Messenger,
    T: TimerPort,
{
    info!("Monitor: sampling every {}ms", period.as_millis());
    loop {
        let cycle = monitor.borrow_mut().poll()?;
        if cycle == Cycle::Breach {
            notifier.broadcast(ALERT_TEXT);
        }
        timer.sleep(period).await;
    }
}
