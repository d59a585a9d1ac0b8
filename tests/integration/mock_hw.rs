//! Simulated dimmer board for integration tests.
//!
//! A millisecond clock is shared between the board and [`SimDelay`]; the
//! button is a script of `[down, up)` intervals on that clock. Halting
//! jumps the clock to the next wake edge, so a whole interaction runs in
//! microseconds while every timing decision stays observable.

use std::cell::Cell;
use std::rc::Rc;

use dimmer::app::events::AppEvent;
use dimmer::app::ports::{
    ButtonPort, EventSink, InterruptSource, PwmPort, SleepController, WhiteLedPort,
};
use dimmer::app::service::DimmerService;
use dimmer::power::SleepMode;
use embedded_hal::delay::DelayNs;

// ── Clock ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn now(&self) -> u64 {
        self.0.get()
    }

    fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }

    fn set(&self, t: u64) {
        self.0.set(t);
    }
}

/// Blocking delay that just moves the simulated clock.
pub struct SimDelay {
    clock: SimClock,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance(u64::from(ns) / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(u64::from(ms));
    }
}

// ── Board ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt {
    pub at: u64,
    pub mode: SleepMode,
}

pub struct SimBoard {
    clock: SimClock,
    presses: Vec<(u64, u64)>,
    pub duty: u8,
    pub duty_log: Vec<(u64, u8)>,
    pub white: bool,
    pub halts: Vec<Halt>,
    mode: SleepMode,
    sleep_enabled: bool,
    interrupts_allowed: bool,
    /// Simulated time each duty write takes.
    write_latency_ms: u64,
    /// No further edge exists; the device would sleep forever.
    pub parked_forever: bool,
}

#[allow(dead_code)]
impl SimBoard {
    /// Board whose button is held over each `(down_ms, up_ms)` interval.
    pub fn new(presses: &[(u64, u64)]) -> (Self, SimDelay) {
        let clock = SimClock::default();
        let mut presses = presses.to_vec();
        presses.sort_unstable();
        let board = Self {
            clock: clock.clone(),
            presses,
            duty: 0,
            duty_log: Vec::new(),
            white: false,
            halts: Vec::new(),
            mode: SleepMode::Idle,
            sleep_enabled: false,
            interrupts_allowed: false,
            write_latency_ms: 0,
            parked_forever: false,
        };
        (board, SimDelay { clock })
    }

    /// Make every duty write advance the clock by `ms`.
    pub fn with_write_latency(mut self, ms: u64) -> Self {
        self.write_latency_ms = ms;
        self
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    fn held_at(&self, t: u64) -> bool {
        self.presses.iter().any(|&(down, up)| t >= down && t < up)
    }

    /// Next edge strictly after now. Power-down only wakes on a press.
    fn next_wake(&self, mode: SleepMode) -> Option<u64> {
        let now = self.now();
        self.presses
            .iter()
            .flat_map(|&(down, up)| match mode {
                SleepMode::Idle => vec![down, up],
                SleepMode::PowerDown => vec![down],
            })
            .filter(|&t| t > now)
            .min()
    }
}

impl ButtonPort for SimBoard {
    fn is_pressed(&mut self) -> bool {
        self.held_at(self.now())
    }
}

impl PwmPort for SimBoard {
    fn set_duty(&mut self, duty: u8) {
        if duty != self.duty {
            self.duty_log.push((self.now(), duty));
        }
        self.duty = duty;
        self.clock.advance(self.write_latency_ms);
    }
}

impl WhiteLedPort for SimBoard {
    fn set_white(&mut self, on: bool) {
        self.white = on;
    }
}

impl SleepController for SimBoard {
    fn set_sleep_mode(&mut self, mode: SleepMode) {
        self.mode = mode;
    }

    fn enable_sleep(&mut self) {
        self.sleep_enabled = true;
    }

    fn halt(&mut self) {
        assert!(self.sleep_enabled, "halt without sleep-enable");
        assert!(self.interrupts_allowed, "halt with wake interrupt masked");
        self.halts.push(Halt {
            at: self.now(),
            mode: self.mode,
        });
        match self.next_wake(self.mode) {
            Some(t) => self.clock.set(t),
            None => self.parked_forever = true,
        }
    }

    fn disable_sleep(&mut self) {
        self.sleep_enabled = false;
    }
}

impl InterruptSource for SimBoard {
    fn allow_interrupts(&mut self) {
        self.interrupts_allowed = true;
    }

    fn mask_interrupts(&mut self) {
        self.interrupts_allowed = false;
    }

    fn wake_pending(&mut self) -> bool {
        self.is_pressed()
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Driver ────────────────────────────────────────────────────

/// Start a service on `board` and run the main loop until the board has
/// nothing left to wake it. Panics if the loop fails to settle.
pub fn run_to_idle(board: &mut SimBoard, delay: &mut SimDelay) -> (DimmerService, RecordingSink) {
    let mut svc = DimmerService::new();
    let mut sink = RecordingSink::new();
    svc.start(board, &mut sink);

    for _ in 0..10_000 {
        if board.parked_forever {
            return (svc, sink);
        }
        svc.run_once(board, delay, &mut sink);
    }
    panic!("main loop did not settle");
}
