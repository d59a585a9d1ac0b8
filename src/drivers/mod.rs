//! Input driver, hardware initialisation and peripheral helpers.

pub mod button;
pub mod hw_init;
#[cfg(target_os = "espidf")]
pub mod watchdog;
