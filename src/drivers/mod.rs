//! GPIO drivers, device reset, and thread helpers.

pub mod contact;
pub mod indicator;
pub mod reset;
#[cfg(not(target_os = "espidf"))]
pub mod sim_gpio;
pub mod task_pin;
