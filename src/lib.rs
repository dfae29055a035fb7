//! Window alarm firmware library.
//!
//! Exposes the alarm logic, adapters and supervisor for integration
//! testing and the host simulation. All ESP-IDF-specific code is guarded
//! by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod net;
pub mod pins;
pub mod supervisor;

pub mod adapters;
pub mod drivers;
