//! Runtime diagnostics.
//!
//! Counters describing what the controller did with its inputs, plus a
//! fixed-capacity trail of the most recent audit entries.  Nothing here
//! is persisted; both reset with the process.

use heapless::HistoryBuffer;
use serde::Serialize;

use crate::app::events::AuditEntry;
use crate::ingress::DropReason;

/// Number of audit entries kept in memory.
pub const AUDIT_TRAIL_LEN: usize = 32;

/// Runtime counters collected since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeMetrics {
    pub health_signals: u64,
    pub commands_admitted: u64,
    /// Commands received before the interlock latched.
    pub dropped_inactive: u64,
    /// Commands whose source state was stale.
    pub dropped_stale: u64,
    pub requests_rejected: u64,
    pub transitions: u64,
    pub preemptions: u64,
    pub snapshots_published: u64,
}

impl RuntimeMetrics {
    pub fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::InterlockInactive => self.dropped_inactive += 1,
            DropReason::StaleSource { .. } => self.dropped_stale += 1,
        }
    }
}

/// Ring of the most recent audit entries (oldest overwritten first).
pub struct AuditTrail {
    entries: HistoryBuffer<AuditEntry, AUDIT_TRAIL_LEN>,
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditTrail {
    pub fn new() -> Self {
        Self {
            entries: HistoryBuffer::new(),
        }
    }

    pub fn record(&mut self, entry: AuditEntry) {
        self.entries.write(entry);
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<&AuditEntry> {
        self.entries.recent()
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.oldest_ordered()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.recent().is_none()
    }
}
