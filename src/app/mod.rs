//! Application core — pure domain logic, zero I/O.
//!
//! The press state machine, brightness rules and sleep selection live
//! behind **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
