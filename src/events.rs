//! Interrupt-driven wake signalling.
//!
//! The button ISR is a pure wake source: it carries no data and touches no
//! state the main loop owns. It only records that an edge happened, and
//! only while the power controller has the gate open (the software
//! equivalent of "interrupts enabled" around the halt).
//!
//! ```text
//! ┌─────────────┐  signal()  ┌──────────────┐  take()  ┌──────────────────┐
//! │ Button ISR  │───────────▶│  WakeSignal  │◀─────────│ PowerController  │
//! └─────────────┘            │ gate · count │          │ (allow / mask)   │
//!                            └──────────────┘          └──────────────────┘
//! ```

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Lock-free wake latch shared between one ISR and the main loop.
pub struct WakeSignal {
    gate_open: AtomicBool,
    pending: AtomicU32,
    delivered: AtomicU32,
}

/// Wake signal for the board's button line.
pub static BUTTON_WAKE: WakeSignal = WakeSignal::new();

impl Default for WakeSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeSignal {
    pub const fn new() -> Self {
        Self {
            gate_open: AtomicBool::new(false),
            pending: AtomicU32::new(0),
            delivered: AtomicU32::new(0),
        }
    }

    /// Record an edge. Safe to call from interrupt context.
    ///
    /// Returns `true` when the wake was delivered (gate open); the caller
    /// then resumes the parked task.
    pub fn signal(&self) -> bool {
        if !self.gate_open.load(Ordering::Acquire) {
            return false;
        }
        self.pending.fetch_add(1, Ordering::AcqRel);
        self.delivered.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Allow the ISR to deliver wakes. Any wakes recorded before this call
    /// are discarded.
    pub fn open(&self) {
        self.pending.store(0, Ordering::Release);
        self.gate_open.store(true, Ordering::Release);
    }

    /// Stop delivering wakes.
    pub fn close(&self) {
        self.gate_open.store(false, Ordering::Release);
    }

    pub fn is_open(&self) -> bool {
        self.gate_open.load(Ordering::Acquire)
    }

    /// Consume the wakes delivered since the gate was opened.
    pub fn take(&self) -> u32 {
        self.pending.swap(0, Ordering::AcqRel)
    }

    /// Total wakes delivered since boot (wraps).
    pub fn delivered(&self) -> u32 {
        self.delivered.load(Ordering::Relaxed)
    }
}
