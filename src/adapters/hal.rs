//! Generic `embedded-hal` 1.0 wrappers implementing the output/input ports.
//!
//! These hold any HAL pin type, so the ESP32 board adapter and the host
//! tests share the same conversion and error policy: a failing read is
//! "not pressed", a failing write is logged and dropped. Nothing here panics.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ButtonPort, PwmPort, WhiteLedPort};
use crate::error::{Error, PwmError};

// ── Button ────────────────────────────────────────────────────

/// Active-low push-button on a pull-up input.
pub struct HalButton<P> {
    pin: P,
}

impl<P: InputPin> HalButton<P> {
    /// The pin must already be configured as an input with pull-up.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> ButtonPort for HalButton<P> {
    fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                warn!("button: read failed ({:?}), treating as released", e);
                false
            }
        }
    }
}

// ── Red LED (PWM) ─────────────────────────────────────────────

/// 8-bit brightness on top of any [`SetDutyCycle`] channel.
pub struct HalPwm<P> {
    channel: P,
    duty: u8,
}

impl<P: SetDutyCycle> HalPwm<P> {
    /// Wrap `channel` and drive it to 0.
    ///
    /// Fails if the channel cannot resolve 256 levels.
    pub fn new(channel: P) -> crate::error::Result<Self> {
        let max_duty = channel.max_duty_cycle();
        if max_duty < u16::from(u8::MAX) {
            return Err(PwmError::ResolutionTooLow { max_duty }.into());
        }
        let mut pwm = Self { channel, duty: 0 };
        pwm.write(0).map_err(Error::from)?;
        Ok(pwm)
    }

    /// Last duty successfully written.
    pub fn duty(&self) -> u8 {
        self.duty
    }

    fn write(&mut self, duty: u8) -> Result<(), PwmError> {
        self.channel
            .set_duty_cycle_fraction(u16::from(duty), u16::from(u8::MAX))
            .map_err(|_| PwmError::WriteFailed)?;
        self.duty = duty;
        Ok(())
    }
}

impl<P: SetDutyCycle> PwmPort for HalPwm<P> {
    fn set_duty(&mut self, duty: u8) {
        if let Err(e) = self.write(duty) {
            warn!("pwm: duty {} not applied: {}", duty, e);
        }
    }
}

// ── White LED ─────────────────────────────────────────────────

/// Active-high white LED enable.
pub struct HalWhiteLed<P> {
    pin: P,
}

impl<P: OutputPin> HalWhiteLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: OutputPin> WhiteLedPort for HalWhiteLed<P> {
    fn set_white(&mut self, on: bool) {
        let result = if on { self.pin.set_high() } else { self.pin.set_low() };
        if let Err(e) = result {
            warn!("white led: write failed ({:?})", e);
        }
    }
}
