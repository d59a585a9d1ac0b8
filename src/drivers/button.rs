//! Blocking button reader and press classifier.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up. The [`ButtonPort`] adapter
//! reports the raw level; everything here is timing on top of it.
//!
//! ## Classification
//!
//! | Step              | Wait   | Re-read     | Outcome                      |
//! |-------------------|--------|-------------|------------------------------|
//! | debounce          | 80 ms  | raw level   | not pressed → `NotPressed`   |
//! | hold window       | 400 ms | raw level   | pressed → `LongPress`        |
//! |                   |        |             | released → `ShortPress`      |
//!
//! The second read is deliberately raw: re-debouncing would stall another
//! 80 ms on every long press. No wait happens at all when the button is up.

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::app::ports::ButtonPort;
use crate::config::{DEBOUNCE_MS, LONG_PRESS_WINDOW_MS};

/// Result of classifying the button at one polling instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressEvent {
    NotPressed,
    ShortPress,
    LongPress,
}

impl PressEvent {
    /// Short and long presses both mean the button was down when polled.
    pub fn is_press(self) -> bool {
        !matches!(self, Self::NotPressed)
    }
}

/// Debounce + tap/hold discrimination over a [`ButtonPort`].
#[derive(Debug, Default)]
pub struct ButtonDriver {
    samples: u32,
    bounces: u32,
}

impl ButtonDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Debounced "is pressed".
    ///
    /// Stalls for [`DEBOUNCE_MS`] only when the first raw read is asserted.
    pub fn sample(&mut self, button: &mut impl ButtonPort, delay: &mut impl DelayNs) -> bool {
        self.samples = self.samples.wrapping_add(1);

        if !button.is_pressed() {
            return false;
        }

        delay.delay_ms(DEBOUNCE_MS);

        if button.is_pressed() {
            true
        } else {
            self.bounces = self.bounces.wrapping_add(1);
            trace!("button: bounce rejected after {}ms settle", DEBOUNCE_MS);
            false
        }
    }

    /// Classify the press at this polling instant.
    pub fn classify(
        &mut self,
        button: &mut impl ButtonPort,
        delay: &mut impl DelayNs,
    ) -> PressEvent {
        if !self.sample(button, delay) {
            return PressEvent::NotPressed;
        }

        delay.delay_ms(LONG_PRESS_WINDOW_MS);

        if button.is_pressed() {
            PressEvent::LongPress
        } else {
            PressEvent::ShortPress
        }
    }

    /// Debounced samples taken since boot (wraps).
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Raw presses rejected by the debounce re-read (wraps).
    pub fn bounces(&self) -> u32 {
        self.bounces
    }
}
