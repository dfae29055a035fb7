//! Port traits: the hexagonal boundary between alarm logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SensorMonitor / CommandDispatcher / Supervisor
//! ```
//!
//! The contact input and the indicator output are not wrapped here: the
//! core consumes `embedded_hal::digital::{InputPin, OutputPin}` directly,
//! which ESP-IDF pin drivers and host mocks both implement.
//!
//! ## Suspension points
//!
//! The core runs on a cooperative executor. Only [`TimerPort::sleep`] and
//! [`UpdateSource::next_update`] may suspend; every other port call must
//! return promptly or it stalls the sibling task.

use core::future::Future;
use core::time::Duration;
use std::rc::Rc;

use super::events::{ChatId, InboundMessage};
use super::state::WindowState;
use crate::error::{NetworkError, Result, TransportError};

// ───────────────────────────────────────────────────────────────
// Timer port
// ───────────────────────────────────────────────────────────────

/// Cooperative sleep. The only way the monitor loop, the bring-up poll and
/// the recovery delay give up the CPU.
pub trait TimerPort {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

impl<T: TimerPort + ?Sized> TimerPort for &T {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        (**self).sleep(duration)
    }
}

// ───────────────────────────────────────────────────────────────
// Connectivity port
// ───────────────────────────────────────────────────────────────

/// Station-mode network link used during bring-up.
pub trait WifiLink {
    /// Whether the link currently reports up.
    fn is_connected(&self) -> bool;

    /// Start associating with `ssid`. Returns immediately; progress is
    /// observed through [`is_connected`](Self::is_connected).
    fn begin_connect(&mut self, ssid: &str, password: &str) -> core::result::Result<(), NetworkError>;

    /// Address information for logging once connected.
    fn link_info(&self) -> Option<String>;
}

// ───────────────────────────────────────────────────────────────
// Messaging ports
// ───────────────────────────────────────────────────────────────

/// Outbound half of the messaging collaborator. Fire-and-forget: no
/// delivery confirmation, never blocks.
pub trait Messenger {
    fn send(&self, recipient: ChatId, text: &str);
}

impl<M: Messenger + ?Sized> Messenger for Rc<M> {
    fn send(&self, recipient: ChatId, text: &str) {
        (**self).send(recipient, text);
    }
}

impl<M: Messenger + ?Sized> Messenger for &M {
    fn send(&self, recipient: ChatId, text: &str) {
        (**self).send(recipient, text);
    }
}

/// Inbound half of the messaging collaborator.
///
/// Resolves with the next update, or with a [`TransportError`] when the
/// transport has failed. Retry behaviour inside the transport is opaque to
/// the core.
pub trait UpdateSource {
    fn next_update(&mut self) -> impl Future<Output = core::result::Result<InboundMessage, TransportError>>;
}

// ───────────────────────────────────────────────────────────────
// Alarm control (dispatcher → monitor)
// ───────────────────────────────────────────────────────────────

/// Operations the command dispatcher may perform on the alarm.
pub trait AlarmControl {
    fn arm(&mut self);

    /// Disarm and clear the visual indicator, whatever the window state.
    fn disarm(&mut self) -> Result<()>;

    fn is_armed(&self) -> bool;

    /// Last sampled window position, independent of the arm flag.
    fn window_state(&self) -> WindowState;
}

// ───────────────────────────────────────────────────────────────
// Device reset
// ───────────────────────────────────────────────────────────────

/// Hard device reset used by the production recovery policy.
///
/// On hardware this never returns; simulations may return after
/// recording the request.
pub trait ResetPort {
    fn reset(&mut self);
}
