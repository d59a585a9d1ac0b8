//! Power controller: park the CPU until the button wakes it.
//!
//! Sleep entry is a scoped acquisition. [`SleepGuard`] selects the mode,
//! sets sleep-enable and allows the wake interrupt; dropping it masks the
//! interrupt and clears sleep-enable again, on every exit path including
//! unwinding.
//!
//! | Mode        | Wake latency | Used when                                   |
//! |-------------|--------------|---------------------------------------------|
//! | `Idle`      | low          | LED on, or a brightness ramp is in progress |
//! | `PowerDown` | higher       | LED fully off                               |
//!
//! The wake line is level-sensitive: if it is already asserted when the
//! guard is taken (button still held), the halt is skipped and the main loop
//! runs again immediately. No timer or watchdog wake exists.

use log::{debug, trace};

use crate::app::ports::{InterruptSource, SleepController};

/// Processor low-power state selected before each sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SleepMode {
    /// CPU halted, peripherals (PWM) keep running.
    Idle,
    /// Deepest state that preserves RAM. PWM output stops.
    PowerDown,
}

/// How a call to [`PowerController::enter`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeOutcome {
    /// The CPU halted and the wake interrupt resumed it.
    Woken,
    /// The wake line was already asserted; no halt happened.
    AlreadyPending,
}

// ---------------------------------------------------------------------------
// Scoped sleep-enable
// ---------------------------------------------------------------------------

/// Holds the sleep-enabled, interrupts-allowed state for its lifetime.
struct SleepGuard<'a, H: SleepController + InterruptSource> {
    hw: &'a mut H,
}

impl<'a, H: SleepController + InterruptSource> SleepGuard<'a, H> {
    fn acquire(hw: &'a mut H, mode: SleepMode) -> Self {
        hw.set_sleep_mode(mode);
        hw.enable_sleep();
        hw.allow_interrupts();
        Self { hw }
    }
}

impl<H: SleepController + InterruptSource> Drop for SleepGuard<'_, H> {
    fn drop(&mut self) {
        self.hw.mask_interrupts();
        self.hw.disable_sleep();
    }
}

// ---------------------------------------------------------------------------
// PowerController
// ---------------------------------------------------------------------------

/// Tracks sleep statistics and performs guarded sleep entry.
#[derive(Debug, Default)]
pub struct PowerController {
    halts: u64,
    skipped: u64,
}

impl PowerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep in `mode` until the wake interrupt fires.
    ///
    /// Blocks the only thread of execution. Returns once the CPU resumes,
    /// with sleep-enable cleared and the wake interrupt masked.
    pub fn enter<H>(&mut self, hw: &mut H, mode: SleepMode) -> WakeOutcome
    where
        H: SleepController + InterruptSource,
    {
        let guard = SleepGuard::acquire(hw, mode);

        if guard.hw.wake_pending() {
            self.skipped += 1;
            trace!("power: wake already pending, skipping {:?} halt", mode);
            return WakeOutcome::AlreadyPending;
        }

        debug!("power: entering {:?}", mode);
        guard.hw.halt();
        self.halts += 1;
        debug!("power: resumed from {:?}", mode);
        WakeOutcome::Woken
    }

    /// Number of completed halts.
    pub fn halts(&self) -> u64 {
        self.halts
    }

    /// Number of sleeps skipped because the wake line was already asserted.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
