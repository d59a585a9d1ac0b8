//! Hardware adapter: bridges the ESP32-C3 board to the domain port traits.
//!
//! Owns the button input, the red LED's LEDC channel, the white LED output
//! and the task notification the wake ISR fires. This is the only module
//! that parks the CPU.
//!
//! | Mode        | Halt                                   | LEDC     |
//! |-------------|----------------------------------------|----------|
//! | `Idle`      | block the main task on a notification  | running  |
//! | `PowerDown` | `esp_light_sleep_start()`, GPIO wake   | stopped  |

use std::sync::Arc;

use esp_idf_hal::delay::BLOCK;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, Output, PinDriver, Pull};
use esp_idf_hal::ledc::LedcDriver;
use esp_idf_hal::task::notification::{Notification, Notifier};
use log::{debug, info, warn};

use super::hal::{HalButton, HalPwm, HalWhiteLed};
use crate::app::ports::{ButtonPort, InterruptSource, PwmPort, SleepController, WhiteLedPort};
use crate::drivers::hw_init;
use crate::error::Result;
use crate::events::BUTTON_WAKE;
use crate::power::SleepMode;

type ButtonPin = PinDriver<'static, AnyIOPin, Input>;
type WhitePin = PinDriver<'static, AnyOutputPin, Output>;

/// Every port the dimmer needs, implemented on the real board.
pub struct EspBoard {
    button: HalButton<ButtonPin>,
    red: HalPwm<LedcDriver<'static>>,
    white: HalWhiteLed<WhitePin>,
    wake: Notification,
    /// Kept alive for as long as the ISR holds a raw pointer to it.
    _notifier: Arc<Notifier>,
    mode: SleepMode,
    sleep_enabled: bool,
}

impl EspBoard {
    /// Configure the pins, register the wake ISR and drive both LEDs off.
    ///
    /// Must be called from the main task: the wake notification targets
    /// the task that creates it.
    pub fn new(
        button: AnyIOPin,
        red: LedcDriver<'static>,
        white: AnyOutputPin,
    ) -> Result<Self> {
        let mut button = PinDriver::input(button)?;
        button.set_pull(Pull::Up)?;

        let white = PinDriver::output(white)?;
        let red = HalPwm::new(red)?;

        let wake = Notification::new();
        let notifier = wake.notifier();
        hw_init::install_wake_isr(&notifier)?;

        info!("board: button, red LEDC, white LED ready");

        Ok(Self {
            button: HalButton::new(button),
            red,
            white: HalWhiteLed::new(white),
            wake,
            _notifier: notifier,
            mode: SleepMode::Idle,
            sleep_enabled: false,
        })
    }
}

// ── Inputs / outputs ──────────────────────────────────────────

impl ButtonPort for EspBoard {
    fn is_pressed(&mut self) -> bool {
        self.button.is_pressed()
    }
}

impl PwmPort for EspBoard {
    fn set_duty(&mut self, duty: u8) {
        self.red.set_duty(duty);
    }
}

impl WhiteLedPort for EspBoard {
    fn set_white(&mut self, on: bool) {
        self.white.set_white(on);
    }
}

// ── Sleep ─────────────────────────────────────────────────────

impl SleepController for EspBoard {
    fn set_sleep_mode(&mut self, mode: SleepMode) {
        self.mode = mode;
    }

    fn enable_sleep(&mut self) {
        self.sleep_enabled = true;
    }

    fn halt(&mut self) {
        if !self.sleep_enabled {
            warn!("board: halt without sleep-enable, ignoring");
            return;
        }

        match self.mode {
            SleepMode::Idle => {
                let _ = self.wake.wait(BLOCK);
            }
            SleepMode::PowerDown => {
                if let Err(e) = hw_init::light_sleep() {
                    warn!("board: light sleep failed: {}", e);
                }
            }
        }
        debug!("board: woke ({} edge(s) since arm)", BUTTON_WAKE.take());
    }

    fn disable_sleep(&mut self) {
        self.sleep_enabled = false;
    }
}

impl InterruptSource for EspBoard {
    fn allow_interrupts(&mut self) {
        // Drop a notification left over from a skipped halt before the
        // gate opens; everything after this point is a fresh edge.
        let _ = self.wake.wait(0);
        BUTTON_WAKE.open();
    }

    fn mask_interrupts(&mut self) {
        BUTTON_WAKE.close();
    }

    fn wake_pending(&mut self) -> bool {
        self.button.is_pressed()
    }
}
