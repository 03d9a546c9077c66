//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via `tracing-subscriber` in the binary).
//! The audit line goes out verbatim at `info`.  Interlock changes and
//! rejections are logged by the core itself, so they are skipped here.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs [`AppEvent`]s not already logged by the core.
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
            AppEvent::Status(s) => {
                debug!(
                    "STATUS | mode={} | state={} | last={} | health={} | payload={}",
                    s.operation_mode.label(),
                    s.current_state.label(),
                    s.previous_state.label(),
                    if s.health_ok { "OK" } else { "FAIL" },
                    s.payload,
                );
            }
            AppEvent::Audit(entry) => info!("{entry}"),
            // Already logged where they happen (interlock and service).
            AppEvent::RequestRejected(_)
            | AppEvent::Preempted { .. }
            | AppEvent::Resumed { .. }
            | AppEvent::InterlockActivated => {}
            AppEvent::Started { mode, state } => {
                info!("START | mode={} | state={}", mode.label(), state.label());
            }
        }
    }
}
