//! Mutable controller state threaded through every FSM handler.
//!
//! `ControllerState` is the single struct that state handlers read from and
//! write to: brightness position, ramp direction, the white-LED fuse and the
//! output commands the main loop applies after each event. It is created
//! once at boot and lives for the whole run.

use crate::config::{INITIAL_BRIGHTNESS_INDEX, duty_for_index};
use crate::power::SleepMode;

// ---------------------------------------------------------------------------
// Ramp direction
// ---------------------------------------------------------------------------

/// Direction the next long press moves the brightness index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Signed index delta.
    pub const fn step(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the main loop)
// ---------------------------------------------------------------------------

/// What the main loop must do after an event has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCommands {
    /// Red LED duty cycle (0 = off).
    pub duty: u8,
    /// White LED level.
    pub white_led_on: bool,
    /// Sleep mode for the upcoming park.
    pub sleep_mode: SleepMode,
    /// Blocking wait before sleeping. Non-zero only for the event that
    /// switched the LED off; reset before every event.
    pub pre_sleep_delay_ms: u32,
}

impl Default for OutputCommands {
    fn default() -> Self {
        Self {
            duty: duty_for_index(INITIAL_BRIGHTNESS_INDEX),
            white_led_on: true,
            sleep_mode: SleepMode::Idle,
            pre_sleep_delay_ms: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// ControllerState
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerState {
    /// Position in [`BRIGHTNESS_TABLE`](crate::config::BRIGHTNESS_TABLE).
    pub brightness_index: u8,
    pub direction: Direction,
    /// Long-press steps taken at the high clamp in the current episode.
    pub white_fuse_count: u8,
    /// One-way: set when the fuse reaches its threshold, never cleared.
    pub white_latched: bool,
    /// A long-press episode is in progress.
    pub long_press_active: bool,
    pub commands: OutputCommands,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerState {
    /// Power-on state: index 5, ramping up, fuse clear, LED lit.
    pub fn new() -> Self {
        Self {
            brightness_index: INITIAL_BRIGHTNESS_INDEX,
            direction: Direction::Up,
            white_fuse_count: 0,
            white_latched: false,
            long_press_active: false,
            commands: OutputCommands::default(),
        }
    }

    /// The LED counts as on whenever the applied duty is non-zero.
    pub fn led_on(&self) -> bool {
        self.commands.duty != 0
    }
}
