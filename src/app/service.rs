//! Application service: the hexagonal core.
//!
//! [`ChassisService`] owns the status record, the health interlock, and
//! the status publisher.  It is the single writer of the record: every
//! handler runs to completion on `&mut self`, so callers serialise the
//! three event sources simply by owning the service in one dispatch loop.
//!
//! ```text
//!  Health ───▶ ┌──────────────────────────────┐ ──▶ EventSink
//!              │        ChassisService         │
//! Commands ──▶ │ Interlock · Ingress · FSM     │
//!              │ Publisher                     │
//!  Ticks ────▶ └──────────────────────────────┘
//! ```

use log::{debug, error, info};

use crate::config::ControllerConfig;
use crate::diagnostics::{AuditTrail, RuntimeMetrics};
use crate::error::TaskError;
use crate::events::Event;
use crate::fsm::context::StatusRecord;
use crate::fsm::{self, Outcome};
use crate::ingress::{self, DropReason};
use crate::safety::{HealthChange, HealthInterlock, HealthSignal};
use crate::telemetry::{StatusPublisher, StatusSnapshot};

use super::commands::CommandEvent;
use super::events::{AppEvent, AuditEntry};
use super::ports::{EventSink, TimePort};

/// What happened to a command event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not admitted by ingress.
    Dropped(DropReason),
    /// Admitted and applied (the record may or may not have changed).
    Applied(Outcome),
}

// ───────────────────────────────────────────────────────────────
// ChassisService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct ChassisService {
    record: StatusRecord,
    interlock: HealthInterlock,
    publisher: StatusPublisher,
    metrics: RuntimeMetrics,
    trail: AuditTrail,
}

impl ChassisService {
    /// Construct the service in `{Idle, Standby}` with the interlock inactive.
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            record: StatusRecord::new(),
            interlock: HealthInterlock::new(),
            publisher: StatusPublisher::new(config.publish_interval_ms),
            metrics: RuntimeMetrics::default(),
            trail: AuditTrail::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the initial state.  Nothing is published until the
    /// first health signal arrives.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        info!("Chassis initialised in STANDBY mode");
        info!("Waiting for health monitor");
        sink.emit(&AppEvent::Started {
            mode: self.record.operation_mode(),
            state: self.record.current_state(),
        });
    }

    // ── Event handlers ────────────────────────────────────────

    /// Route one queued event to its handler.
    pub fn dispatch(&mut self, event: Event, clock: &impl TimePort, sink: &mut impl EventSink) {
        match event {
            Event::Health(signal) => self.handle_health(signal, clock, sink),
            Event::Command(cmd) => {
                // Rejections are already surfaced through the sink.
                let _ = self.handle_command(cmd, clock, sink);
            }
            Event::PublishTick => {
                self.publish_status(sink);
            }
            Event::Shutdown => debug!("Shutdown event reached the service"),
        }
    }

    /// Apply a health signal: latch the interlock, then preempt or resume.
    pub fn handle_health(&mut self, signal: HealthSignal, clock: &impl TimePort, sink: &mut impl EventSink) {
        self.metrics.health_signals += 1;
        let report = self.interlock.apply(signal, &mut self.record);

        if report.activated {
            info!("Chassis ready for operation");
            sink.emit(&AppEvent::InterlockActivated);
            self.audit("Starting Up", clock, sink);
        }

        match report.change {
            Some(HealthChange::Preempted { suspended }) => {
                self.metrics.preemptions += 1;
                self.metrics.transitions += 1;
                self.audit("System Failure Detected", clock, sink);
                sink.emit(&AppEvent::Preempted { suspended });
            }
            Some(HealthChange::Resumed { restored }) => {
                self.metrics.transitions += 1;
                self.audit("Diagnostics Complete", clock, sink);
                sink.emit(&AppEvent::Resumed { restored });
            }
            None => {}
        }
    }

    /// Screen a command event through ingress and apply it.
    ///
    /// Stale or early events are dropped silently (`Ok(Dropped)`).
    /// Precondition violations are surfaced to the sink and returned.
    pub fn handle_command(
        &mut self,
        event: CommandEvent,
        clock: &impl TimePort,
        sink: &mut impl EventSink,
    ) -> Result<CommandOutcome, TaskError> {
        let event = match ingress::admit(self.interlock.is_active(), self.record.current_state(), event) {
            Ok(event) => event,
            Err(reason) => {
                self.metrics.record_drop(reason);
                return Ok(CommandOutcome::Dropped(reason));
            }
        };
        self.metrics.commands_admitted += 1;

        match fsm::apply(&mut self.record, &event) {
            Ok(outcome) => {
                if let Outcome::Transitioned(_) = outcome {
                    self.metrics.transitions += 1;
                }
                if let Some(action) = outcome.action() {
                    self.audit(action, clock, sink);
                }
                Ok(CommandOutcome::Applied(outcome))
            }
            Err(e) => {
                error!("Error: {}", e);
                self.metrics.requests_rejected += 1;
                sink.emit(&AppEvent::RequestRejected(e));
                Err(e)
            }
        }
    }

    /// Publish a status snapshot if the interlock is active.
    pub fn publish_status(&mut self, sink: &mut impl EventSink) -> Option<StatusSnapshot> {
        let snapshot = self.publisher.tick(&self.interlock, &self.record)?;
        self.metrics.snapshots_published += 1;
        sink.emit(&AppEvent::Status(snapshot));
        Some(snapshot)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Read-only view of the status record.
    pub fn record(&self) -> &StatusRecord {
        &self.record
    }

    /// Current snapshot regardless of interlock state (diagnostics only).
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::capture(&self.record)
    }

    pub fn interlock_active(&self) -> bool {
        self.interlock.is_active()
    }

    pub fn publisher(&self) -> &StatusPublisher {
        &self.publisher
    }

    pub fn metrics(&self) -> RuntimeMetrics {
        self.metrics
    }

    pub fn audit_trail(&self) -> &AuditTrail {
        &self.trail
    }

    // ── Internal ──────────────────────────────────────────────

    fn audit(&mut self, action: &'static str, clock: &impl TimePort, sink: &mut impl EventSink) {
        let elapsed = clock.elapsed();
        // Round to the nearest second like the operator console does.
        let elapsed_secs = elapsed.as_secs() + u64::from(elapsed.subsec_millis() >= 500);
        let entry = AuditEntry {
            elapsed_secs,
            mode: self.record.operation_mode(),
            current: self.record.current_state(),
            previous: self.record.previous_state(),
            action,
        };
        sink.emit(&AppEvent::Audit(entry.clone()));
        self.trail.record(entry);
    }
}
