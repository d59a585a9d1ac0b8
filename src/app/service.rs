//! Application service — the hexagonal core.
//!
//! [`DimmerService`] owns the FSM, the controller state, the button driver
//! and the power controller. One call to [`DimmerService::run_once`] is one
//! trip around the firmware's main loop. All I/O flows through port traits
//! injected at call sites, so the whole loop runs against mock adapters on
//! the host.
//!
//! ```text
//!  ButtonPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │        DimmerService         │
//!     PwmPort ◀── │ classify · FSM · sleep entry │ ──▶ SleepController
//! WhiteLedPort ◀──│                              │ ──▶ InterruptSource
//!                 └──────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, trace};

use crate::drivers::button::{ButtonDriver, PressEvent};
use crate::fsm::context::{ControllerState, OutputCommands};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::power::{PowerController, WakeOutcome};

use super::events::AppEvent;
use super::ports::{
    ButtonPort, EventSink, InterruptSource, PwmPort, SleepController, WhiteLedPort,
};

// ───────────────────────────────────────────────────────────────
// DimmerService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct DimmerService {
    fsm: Fsm,
    ctx: ControllerState,
    button: ButtonDriver,
    power: PowerController,
    /// Duty last written to the red LED.
    applied_duty: u8,
    /// Level last written to the white LED.
    applied_white: bool,
    iterations: u64,
}

impl Default for DimmerService {
    fn default() -> Self {
        Self::new()
    }
}

impl DimmerService {
    /// Construct the service in its power-on state.
    ///
    /// Does **not** touch the outputs: call [`start`](Self::start) next.
    pub fn new() -> Self {
        let ctx = ControllerState::new();
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle),
            applied_duty: ctx.commands.duty,
            applied_white: ctx.commands.white_led_on,
            ctx,
            button: ButtonDriver::new(),
            power: PowerController::new(),
            iterations: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM and drive the power-on outputs: red LED at the initial
    /// brightness, white LED on.
    pub fn start(
        &mut self,
        hw: &mut (impl PwmPort + WhiteLedPort),
        sink: &mut impl EventSink,
    ) {
        self.fsm.start(&mut self.ctx);

        let cmds = self.ctx.commands;
        hw.set_duty(cmds.duty);
        hw.set_white(cmds.white_led_on);
        self.applied_duty = cmds.duty;
        self.applied_white = cmds.white_led_on;

        sink.emit(&AppEvent::Started {
            index: self.ctx.brightness_index,
            duty: cmds.duty,
        });
        info!(
            "DimmerService started: index {} duty {}",
            self.ctx.brightness_index, cmds.duty
        );
    }

    // ── Main-loop iteration ───────────────────────────────────

    /// One full loop: classify the button, update state, apply outputs,
    /// optionally settle, then sleep until the next wake.
    ///
    /// While a long-press episode is open the CPU never halts: the release
    /// may already have happened while outputs were written, and only the
    /// next poll can observe it and end the episode. Such a pass returns
    /// [`WakeOutcome::AlreadyPending`] without emitting sleep events.
    ///
    /// The `hw` parameter satisfies every port at once, which avoids
    /// juggling several mutable borrows of the same board.
    pub fn run_once<H>(
        &mut self,
        hw: &mut H,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> WakeOutcome
    where
        H: ButtonPort + PwmPort + WhiteLedPort + SleepController + InterruptSource,
    {
        self.iterations = self.iterations.wrapping_add(1);

        let event = self.button.classify(hw, delay);
        let cmds = self.handle_press(event, hw, sink);

        if cmds.pre_sleep_delay_ms > 0 {
            delay.delay_ms(cmds.pre_sleep_delay_ms);
        }

        if self.fsm.long_press_active() {
            trace!("episode open, polling again without sleeping");
            return WakeOutcome::AlreadyPending;
        }

        sink.emit(&AppEvent::Sleeping(cmds.sleep_mode));
        let outcome = self.power.enter(hw, cmds.sleep_mode);
        sink.emit(&AppEvent::Woke {
            mode: cmds.sleep_mode,
            outcome,
        });
        outcome
    }

    /// Feed one classified press through the FSM and apply the resulting
    /// outputs. Returns the commands, including the sleep selection the
    /// caller should honour.
    pub fn handle_press(
        &mut self,
        event: PressEvent,
        hw: &mut (impl PwmPort + WhiteLedPort),
        sink: &mut impl EventSink,
    ) -> OutputCommands {
        let prev_state = self.fsm.current_state();
        let was_latched = self.ctx.white_latched;

        let cmds = self.fsm.handle(&mut self.ctx, event);
        self.apply_outputs(&cmds, hw, sink);

        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
            if new_state == StateId::Idle {
                sink.emit(&AppEvent::EpisodeEnded {
                    direction: self.ctx.direction,
                });
            }
        }

        if self.ctx.white_latched && !was_latched {
            sink.emit(&AppEvent::WhiteLedLatched);
        }

        cmds
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Read-only view of the controller state.
    pub fn controller(&self) -> &ControllerState {
        &self.ctx
    }

    /// Whether a long-press episode is in progress.
    pub fn long_press_active(&self) -> bool {
        self.fsm.long_press_active()
    }

    /// Button statistics.
    pub fn button(&self) -> &ButtonDriver {
        &self.button
    }

    /// Sleep statistics.
    pub fn power(&self) -> &PowerController {
        &self.power
    }

    /// Main-loop iterations since startup (wraps).
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate FSM output commands into port calls.
    fn apply_outputs(
        &mut self,
        cmds: &OutputCommands,
        hw: &mut (impl PwmPort + WhiteLedPort),
        sink: &mut impl EventSink,
    ) {
        hw.set_duty(cmds.duty);
        if cmds.duty != self.applied_duty {
            sink.emit(&AppEvent::DutyChanged {
                from: self.applied_duty,
                to: cmds.duty,
            });
            self.applied_duty = cmds.duty;
        }

        if cmds.white_led_on != self.applied_white {
            hw.set_white(cmds.white_led_on);
            self.applied_white = cmds.white_led_on;
        }
    }
}
