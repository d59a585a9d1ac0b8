//! Port traits — the hexagonal boundary between domain logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DimmerService (domain)
//! ```
//!
//! Driven adapters (button input, PWM, white LED, sleep, wake interrupt,
//! event sinks) implement these traits. The
//! [`DimmerService`](super::service::DimmerService) consumes them via
//! generics, so the state machine never touches registers directly and runs
//! unchanged against simulated hardware on the host.
//!
//! Ports are infallible on purpose: a failing pin or PWM write is the
//! adapter's problem to log and map to a safe value.

use crate::power::SleepMode;

// ───────────────────────────────────────────────────────────────
// GPIO input (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw, undebounced button level. Pull-up configuration is the adapter's
/// job; this only answers "is the button electrically asserted right now".
pub trait ButtonPort {
    fn is_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Outputs (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Red LED brightness as an 8-bit duty cycle (0 = off, 255 = full).
pub trait PwmPort {
    fn set_duty(&mut self, duty: u8);
}

/// White LED enable line.
pub trait WhiteLedPort {
    fn set_white(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Power (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Processor sleep primitive, driven by [`PowerController`](crate::power::PowerController).
pub trait SleepController {
    /// Select the low-power state used by the next [`halt`](Self::halt).
    fn set_sleep_mode(&mut self, mode: SleepMode);

    /// Set sleep-enable.
    fn enable_sleep(&mut self);

    /// Halt the CPU until the wake interrupt fires.
    fn halt(&mut self);

    /// Clear sleep-enable.
    fn disable_sleep(&mut self);
}

/// The single wake source: the button's interrupt line.
///
/// The line is registered once at boot and never torn down; these calls only
/// gate delivery around a halt.
pub trait InterruptSource {
    fn allow_interrupts(&mut self);

    fn mask_interrupts(&mut self);

    /// Whether the wake condition already holds, in which case halting would
    /// return immediately.
    fn wake_pending(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
