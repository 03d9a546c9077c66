//! Status publisher.
//!
//! Emits a read-only [`StatusSnapshot`] of the status record on a fixed
//! cadence, gated by the health interlock.  Publishing never mutates the
//! record.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fsm::context::StatusRecord;
use crate::fsm::{OperationMode, State};
use crate::safety::HealthInterlock;

/// Outbound status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub previous_state: State,
    pub current_state: State,
    pub operation_mode: OperationMode,
    pub health_ok: bool,
    pub payload: u32,
}

impl StatusSnapshot {
    pub fn capture(record: &StatusRecord) -> Self {
        Self {
            previous_state: record.previous_state(),
            current_state: record.current_state(),
            operation_mode: record.operation_mode(),
            health_ok: record.health_ok(),
            payload: record.payload(),
        }
    }
}

/// Fixed-cadence snapshot source.
#[derive(Debug, Clone, Copy)]
pub struct StatusPublisher {
    interval: Duration,
}

impl StatusPublisher {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval: Duration::from_millis(u64::from(interval_ms)),
        }
    }

    /// Time between two publish ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Snapshot the record, or `None` while the interlock is inactive.
    pub fn tick(&self, interlock: &HealthInterlock, record: &StatusRecord) -> Option<StatusSnapshot> {
        interlock
            .is_active()
            .then(|| StatusSnapshot::capture(record))
    }
}
