//! Outbound application events.
//!
//! The [`ChassisService`](super::service::ChassisService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them: write the audit log,
//! publish the snapshot, forward to a supervisor, etc.

use core::fmt;

use serde::Serialize;

use crate::error::TaskError;
use crate::fsm::{OperationMode, State};
use crate::telemetry::StatusSnapshot;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic status snapshot.
    Status(StatusSnapshot),

    /// An accepted transition (or log-only step) to record in the audit log.
    Audit(AuditEntry),

    /// A task request was rejected by a precondition.
    RequestRejected(TaskError),

    /// Health failure forced `EmergencyHandling`.
    Preempted { suspended: State },

    /// Health recovery restored the suspended state.
    Resumed { restored: State },

    /// The first health signal latched the interlock.
    InterlockActivated,

    /// The service has started (carries the initial mode and state).
    Started { mode: OperationMode, state: State },
}

/// One audit line.
///
/// Renders as
/// `[H:M:S] MODE: <mode>, CURRENT STATE: <state>, LAST STATE: <state>, UPDATE: <action>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    /// Whole seconds since process start.
    pub elapsed_secs: u64,
    pub mode: OperationMode,
    pub current: State,
    pub previous: State,
    pub action: &'static str,
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed_secs;
        write!(
            f,
            "[{}:{}:{}] MODE: {}, CURRENT STATE: {}, LAST STATE: {}, UPDATE: {}",
            secs / 3600,
            (secs / 60) % 60,
            secs % 60,
            self.mode.label(),
            self.current.label(),
            self.previous.label(),
            self.action,
        )
    }
}
