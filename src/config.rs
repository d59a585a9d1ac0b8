//! Fixed firmware parameters.
//!
//! Every timing constant and table the dimmer uses lives here. None of
//! these are tunable at runtime: the firmware has no configuration store
//! and reinitialises to these values on every power-on.

// --- Button timing ---

/// Settle interval between the first raw "pressed" read and the confirming
/// re-read (milliseconds).
pub const DEBOUNCE_MS: u32 = 80;

/// Hold window separating a tap from a hold (milliseconds). A press still
/// asserted after this window is a long press.
pub const LONG_PRESS_WINDOW_MS: u32 = 400;

/// Pause after switching the LED off and before entering power-down, so the
/// LED visibly goes dark first (milliseconds).
pub const POWER_DOWN_SETTLE_MS: u32 = 200;

// --- Brightness ---

/// Exponential duty-cycle curve, dimmest first.
pub const BRIGHTNESS_TABLE: [u8; 9] = [1, 2, 4, 8, 16, 32, 64, 128, 255];

/// Highest valid index into [`BRIGHTNESS_TABLE`].
pub const MAX_BRIGHTNESS_INDEX: u8 = (BRIGHTNESS_TABLE.len() - 1) as u8;

/// Lowest valid index into [`BRIGHTNESS_TABLE`].
pub const MIN_BRIGHTNESS_INDEX: u8 = 0;

/// Brightness index applied at power-on.
pub const INITIAL_BRIGHTNESS_INDEX: u8 = 5;

/// Duty cycle for a brightness index. Out-of-range indices read the
/// brightest entry.
pub const fn duty_for_index(index: u8) -> u8 {
    let i = index as usize;
    if i < BRIGHTNESS_TABLE.len() {
        BRIGHTNESS_TABLE[i]
    } else {
        BRIGHTNESS_TABLE[BRIGHTNESS_TABLE.len() - 1]
    }
}

// --- White LED fuse ---

/// Number of long-press steps at the high clamp, within one episode, that
/// latches the white LED off for the rest of the run.
pub const WHITE_FUSE_THRESHOLD: u8 = 10;
