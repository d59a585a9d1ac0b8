//! Unified error types for the dimmer firmware.
//!
//! The press classifier, state machine and power controller are total and
//! never produce these. Errors only arise in the outer ring: board bring-up
//! and the HAL adapters that wrap fallible `embedded-hal` pins. All variants
//! are `Copy` so adapters can log and carry them without allocation.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// One-shot peripheral initialisation failed.
    Init(HwInitError),
    /// The PWM channel rejected a configuration or duty write.
    Pwm(PwmError),
    /// A raw ESP-IDF call returned a non-OK code.
    Esp(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Pwm(e) => write!(f, "pwm: {e}"),
            Self::Esp(rc) => write!(f, "ESP-IDF error (rc={rc})"),
        }
    }
}

impl core::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

#[cfg(target_os = "espidf")]
impl From<esp_idf_sys::EspError> for Error {
    fn from(e: esp_idf_sys::EspError) -> Self {
        Self::Esp(e.code())
    }
}

// ---------------------------------------------------------------------------
// PWM errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    /// The channel cannot represent 256 distinct duty levels.
    ResolutionTooLow { max_duty: u16 },
    /// A duty-cycle write was rejected by the peripheral.
    WriteFailed,
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolutionTooLow { max_duty } => {
                write!(f, "resolution too low (max duty {max_duty} < 255)")
            }
            Self::WriteFailed => write!(f, "duty write failed"),
        }
    }
}

impl From<PwmError> for Error {
    fn from(e: PwmError) -> Self {
        Self::Pwm(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
