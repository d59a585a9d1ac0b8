//! Outbound application events.
//!
//! The [`DimmerService`](super::service::DimmerService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them; on the board they go to the serial log.

use crate::fsm::StateId;
use crate::fsm::context::Direction;
use crate::power::{SleepMode, WakeOutcome};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started and applied the power-on outputs.
    Started { index: u8, duty: u8 },

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The red LED duty cycle changed.
    DutyChanged { from: u8, to: u8 },

    /// A long-press episode ended; `direction` is the next ramp direction.
    EpisodeEnded { direction: Direction },

    /// The white LED fuse blew. Emitted once per run.
    WhiteLedLatched,

    /// About to park the CPU.
    Sleeping(SleepMode),

    /// The CPU is running again.
    Woke { mode: SleepMode, outcome: WakeOutcome },
}
