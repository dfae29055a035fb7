//! Application core: alarm logic with no direct I/O.
//!
//! Sensor sampling, command interpretation and breach notification live
//! here. Hardware, network, timers and the messaging wire are reached only
//! through the traits in [`ports`] and the `embedded-hal` digital pin
//! traits, so the whole core runs against mocks on the host.

pub mod commands;
pub mod dispatcher;
pub mod events;
pub mod monitor;
pub mod notifier;
pub mod ports;
pub mod state;
pub mod whitelist;
