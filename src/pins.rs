//! GPIO / peripheral pin assignments for the dimmer board.
//!
//! The raw ISR / sleep setup references these numbers; `main` hands the
//! matching `Peripherals` pins to the board adapter, so keep both in step.
//! Reference board: ESP32-C3, where GPIO9 is the on-board BOOT button.

// ---------------------------------------------------------------------------
// User button (active-low, external pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button. Also the only wake source.
pub const BUTTON_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// LEDs
// ---------------------------------------------------------------------------

/// Red LED, driven by LEDC channel 0.
pub const RED_LED_GPIO: i32 = 4;

/// White LED, plain digital output (active HIGH).
pub const WHITE_LED_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC frequency for the red LED (1 kHz, flicker-free).
pub const RED_PWM_FREQ_HZ: u32 = 1_000;
