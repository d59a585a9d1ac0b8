//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC on the board, any `log` backend on
//! the host).

use log::{debug, info, trace};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { index, duty } => {
                info!("START | index={} duty={}", index, duty);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::DutyChanged { from, to } => {
                debug!("DUTY | {} -> {}", from, to);
            }
            AppEvent::EpisodeEnded { direction } => {
                debug!("EPISODE | ended, next ramp {:?}", direction);
            }
            AppEvent::WhiteLedLatched => {
                info!("WHITE | fuse blown, latched off until restart");
            }
            AppEvent::Sleeping(mode) => {
                trace!("SLEEP | {:?}", mode);
            }
            AppEvent::Woke { mode, outcome } => {
                trace!("WAKE | {:?} ({:?})", mode, outcome);
            }
        }
    }
}
