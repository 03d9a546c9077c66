//! Task state machine core.
//!
//! The chassis walks a fixed sequence of navigation and docking phases
//! per operation mode:
//!
//! ```text
//!  PICKUP   IDLE ─▶ P2P ─▶ IDENTIFY ─▶ DOCK APPROACH ─▶ VERIFY ─▶ LOCK ─▶ IDLE
//!                    ▲        │            ▲              │
//!                    └─[fail]─┘            └── RETRACE ◀─[fail]
//!
//!  DROP OFF IDLE ─▶ P2P ─▶ UNDOCK APPROACH ─▶ UNLOCK ─▶ IDLE
//!
//!  Any state ──[health fail]──▶ EMERGENCY HANDLING ──[health pass]──▶ (suspended state)
//! ```
//!
//! [`apply`] is the single transition function.  It takes one admitted
//! [`CommandEvent`] and mutates the [`StatusRecord`] at most once.  The
//! per-mode tables live in [`transitions`]; the emergency preempt/resume
//! cycle is driven by [`crate::safety`].

pub mod context;
pub mod transitions;

use serde::{Deserialize, Serialize};

use crate::app::commands::{CommandEvent, TaskRequest};
use crate::error::TaskError;
use context::StatusRecord;
use transitions::Step;

// ---------------------------------------------------------------------------
// Operation mode
// ---------------------------------------------------------------------------

/// What the chassis is currently doing.  Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum OperationMode {
    Standby = 0,
    Pickup = 1,
    DropOff = 2,
}

impl OperationMode {
    /// Operator-facing label used in audit lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standby => "Standby",
            Self::Pickup => "Pick Up",
            Self::DropOff => "Drop Off",
        }
    }
}

impl TryFrom<u8> for OperationMode {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Standby),
            1 => Ok(Self::Pickup),
            2 => Ok(Self::DropOff),
            other => Err(other),
        }
    }
}

impl core::fmt::Display for OperationMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Every phase the chassis can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum State {
    Idle = 0,
    #[serde(rename = "p2p")]
    P2P = 1,
    Identify = 2,
    DockApproach = 3,
    UndockApproach = 4,
    Verify = 5,
    Retrace = 6,
    Lock = 7,
    Unlock = 8,
    EmergencyHandling = 9,
}

impl State {
    /// Total number of states.
    pub const COUNT: usize = 10;

    /// All states in discriminant order.
    pub const ALL: [State; Self::COUNT] = [
        Self::Idle,
        Self::P2P,
        Self::Identify,
        Self::DockApproach,
        Self::UndockApproach,
        Self::Verify,
        Self::Retrace,
        Self::Lock,
        Self::Unlock,
        Self::EmergencyHandling,
    ];

    /// Operator-facing label used in audit lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::P2P => "P2P",
            Self::Identify => "Identify",
            Self::DockApproach => "Dock Approach Navigation",
            Self::UndockApproach => "Undock Approach Navigation",
            Self::Verify => "Verify Pose",
            Self::Retrace => "Retrace",
            Self::Lock => "Dock with Pod",
            Self::Unlock => "Undock with Pod",
            Self::EmergencyHandling => "Emergency Handling State",
        }
    }
}

impl TryFrom<u8> for State {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(raw as usize).copied().ok_or(raw)
    }
}

impl core::fmt::Display for State {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Progress report
// ---------------------------------------------------------------------------

/// Result reported by the subsystem executing the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionCondition {
    Success,
    Failure,
    /// No progress to report (e.g. a bare task request).
    None,
}

// ---------------------------------------------------------------------------
// Transition function
// ---------------------------------------------------------------------------

/// What a single [`apply`] call did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The record changed.  Carries the audit action text.
    Transitioned(&'static str),
    /// Nothing changed, but the event is worth an audit line.
    Logged(&'static str),
    /// Event consumed without any effect.
    Ignored,
}

impl Outcome {
    /// Audit action text, if this outcome should be logged.
    pub fn action(self) -> Option<&'static str> {
        match self {
            Self::Transitioned(action) | Self::Logged(action) => Some(action),
            Self::Ignored => None,
        }
    }
}

/// Apply one admitted command event to the record.
///
/// The event's transition condition is consumed here; each admitted event
/// yields at most one transition attempt.
pub fn apply(record: &mut StatusRecord, event: &CommandEvent) -> Result<Outcome, TaskError> {
    let mode = record.operation_mode();
    let state = record.current_state();

    if mode == OperationMode::Standby && state == State::Idle {
        return dispatch_idle(record, event);
    }
    let step = transitions::handler_for(mode, state)(event.condition);
    Ok(apply_step(record, mode, step))
}

/// Idle/Standby regime: lock confirmation or a new task request.
fn dispatch_idle(record: &mut StatusRecord, event: &CommandEvent) -> Result<Outcome, TaskError> {
    if record.previous_state() == State::Lock {
        // Awaiting confirmation that the pod is actually latched.
        return Ok(match event.condition {
            TransitionCondition::Failure => {
                record.retry_undock();
                Outcome::Transitioned("Locking unsuccessful")
            }
            TransitionCondition::Success | TransitionCondition::None => {
                record.confirm_lock();
                Outcome::Transitioned("Locking verified & successful")
            }
        });
    }

    let Some(request) = event.request else {
        return Ok(Outcome::Ignored);
    };

    match request {
        TaskRequest::DropOff => {
            if !record.pod_attached() {
                return Err(TaskError::PodNotAttached);
            }
            record.begin_task(OperationMode::DropOff, event.payload, State::P2P);
            Ok(Outcome::Transitioned("Input received"))
        }
        TaskRequest::Pickup => {
            if record.pod_attached() {
                return Err(TaskError::PodAlreadyAttached);
            }
            record.begin_task(OperationMode::Pickup, event.payload, State::P2P);
            Ok(Outcome::Transitioned("Input received"))
        }
        // Skips the attachment check; kept as observed pending product-owner review.
        TaskRequest::DirectApproachPickup => {
            record.begin_task(OperationMode::Pickup, event.payload, State::DockApproach);
            Ok(Outcome::Transitioned("Input received, Direct Approach"))
        }
        TaskRequest::Standby => Ok(Outcome::Ignored),
    }
}

fn apply_step(record: &mut StatusRecord, mode: OperationMode, step: Step) -> Outcome {
    match step {
        Step::Advance { to, action } => {
            record.advance(to);
            Outcome::Transitioned(action)
        }
        Step::Finish { action } => {
            match mode {
                OperationMode::DropOff => record.finish_drop_off(),
                OperationMode::Pickup | OperationMode::Standby => record.finish_pickup(),
            }
            Outcome::Transitioned(action)
        }
        Step::LogOnly(action) => Outcome::Logged(action),
        Step::Hold => Outcome::Ignored,
    }
}
