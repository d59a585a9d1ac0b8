//! Function-pointer finite state machine engine.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                       │
//! │  ┌─────────────────────┬──────────┬──────────┬──────────────────┐ │
//! │  │ StateId             │ on_enter │ on_exit  │ on_event         │ │
//! │  ├─────────────────────┼──────────┼──────────┼──────────────────┤ │
//! │  │ Idle                │ -        │ -        │ fn(ctx, ev)->Opt │ │
//! │  │ AdjustingBrightness │ fn(ctx)  │ fn(ctx)  │ fn(ctx, ev)->Opt │ │
//! │  └─────────────────────┴──────────┴──────────┴──────────────────┘ │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every classified press is fed to `on_event` of the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_exit` for the current
//! state, then `on_enter` for the next, and updates the current pointer.
//! All functions receive `&mut ControllerState`.
//!
//! The machine has no terminal state and no failing transitions.

pub mod context;
pub mod states;

use context::{ControllerState, OutputCommands};
use log::info;

use crate::drivers::button::PressEvent;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all controller states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// No long-press episode in progress.
    Idle = 0,
    /// Inside a long-press episode; each further long press steps brightness.
    AdjustingBrightness = 1,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 2;

    /// Convert a table index back to `StateId`. Out-of-range indices map to
    /// `Idle` in release builds.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::AdjustingBrightness,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn = fn(&mut ControllerState);

/// Signature for the per-event handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateEventFn = fn(&mut ControllerState, PressEvent) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_event: StateEventFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The press-driven state machine engine.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    current: usize,
    events_handled: u64,
    transitions: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            events_handled: 0,
            transitions: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    pub fn start(&mut self, ctx: &mut ControllerState) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Feed one classified press to the machine.
    ///
    /// Clears the one-shot pre-sleep delay, dispatches to the current
    /// state's handler, runs any resulting transition and returns the
    /// commands the main loop must apply.
    pub fn handle(&mut self, ctx: &mut ControllerState, event: PressEvent) -> OutputCommands {
        self.events_handled = self.events_handled.wrapping_add(1);
        ctx.commands.pre_sleep_delay_ms = 0;

        if let Some(next_id) = (self.table[self.current].on_event)(ctx, event) {
            self.transition(next_id, ctx);
        }

        ctx.commands
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// Whether a long-press episode is in progress.
    pub fn long_press_active(&self) -> bool {
        self.current_state() == StateId::AdjustingBrightness
    }

    /// Events handled since construction (wraps).
    pub fn events_handled(&self) -> u64 {
        self.events_handled
    }

    /// Completed state transitions since construction.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut ControllerState) {
        let next_idx = next_id as usize;
        if next_idx == self.current {
            return;
        }

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.transitions += 1;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
