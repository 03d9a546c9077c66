//! Per-mode transition tables.
//!
//! Each `(mode, state)` pair maps to a plain `fn` pointer that turns the
//! reported [`TransitionCondition`] into a [`Step`].  [`handler_for`] is an
//! exhaustive match over the full cross-product, so adding a state or a
//! mode fails to compile until every pair has a row.
//!
//! ```text
//!  mode      state            Success            Failure
//!  ───────── ──────────────── ────────────────── ──────────
//!  Pickup    P2P              Identify           -
//!  Pickup    Identify         DockApproach       P2P
//!  Pickup    DockApproach     Verify             -
//!  Pickup    Verify           Lock               Retrace
//!  Pickup    Retrace          DockApproach       -
//!  Pickup    Lock             Idle (Standby)     -
//!  DropOff   P2P              UndockApproach     -
//!  DropOff   UndockApproach   Unlock             -
//!  DropOff   Unlock           Idle (Standby)     -
//! ```
//!
//! `None` holds in every row.  Rows not listed hold as well: incomplete
//! progress reports never advance a task.

use super::{OperationMode, State, TransitionCondition};

/// What the table asks the core to do with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Move to `to`, recording the current state as previous.
    Advance { to: State, action: &'static str },
    /// Task complete: return to Idle/Standby with the mode's side effects.
    Finish { action: &'static str },
    /// No change, but emit an audit line.
    LogOnly(&'static str),
    /// No change.
    Hold,
}

/// Signature of a table row.
pub type StepFn = fn(TransitionCondition) -> Step;

/// Look up the row for `(mode, state)`.
///
/// `(Standby, Idle)` never reaches the table: [`super::apply`] sends it to
/// the idle dispatcher.  Every other Standby row holds.
pub fn handler_for(mode: OperationMode, state: State) -> StepFn {
    use OperationMode as M;
    use State as S;

    match (mode, state) {
        (M::Pickup | M::DropOff, S::Idle) => idle_no_action,

        (M::Pickup, S::P2P) => pickup_p2p,
        (M::Pickup, S::Identify) => pickup_identify,
        (M::Pickup, S::DockApproach) => pickup_dock_approach,
        (M::Pickup, S::Verify) => pickup_verify,
        (M::Pickup, S::Retrace) => pickup_retrace,
        (M::Pickup, S::Lock) => pickup_lock,
        (M::Pickup, S::UndockApproach | S::Unlock | S::EmergencyHandling) => hold,

        (M::DropOff, S::P2P) => drop_off_p2p,
        (M::DropOff, S::UndockApproach) => drop_off_undock_approach,
        (M::DropOff, S::Unlock) => drop_off_unlock,
        (
            M::DropOff,
            S::Identify | S::DockApproach | S::Verify | S::Retrace | S::Lock | S::EmergencyHandling,
        ) => hold,

        (
            M::Standby,
            S::Idle
            | S::P2P
            | S::Identify
            | S::DockApproach
            | S::UndockApproach
            | S::Verify
            | S::Retrace
            | S::Lock
            | S::Unlock
            | S::EmergencyHandling,
        ) => hold,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared rows
// ═══════════════════════════════════════════════════════════════════════════

fn hold(_: TransitionCondition) -> Step {
    Step::Hold
}

fn idle_no_action(_: TransitionCondition) -> Step {
    Step::LogOnly("No action taken")
}

fn on_success(cond: TransitionCondition, step: Step) -> Step {
    match cond {
        TransitionCondition::Success => step,
        TransitionCondition::Failure | TransitionCondition::None => Step::Hold,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  PICKUP
// ═══════════════════════════════════════════════════════════════════════════

fn pickup_p2p(cond: TransitionCondition) -> Step {
    on_success(
        cond,
        Step::Advance {
            to: State::Identify,
            action: "Destination Reached",
        },
    )
}

fn pickup_identify(cond: TransitionCondition) -> Step {
    match cond {
        TransitionCondition::Success => Step::Advance {
            to: State::DockApproach,
            action: "PHZ Correctly Identified",
        },
        TransitionCondition::Failure => Step::Advance {
            to: State::P2P,
            action: "Incorrect PHZ reached",
        },
        TransitionCondition::None => Step::Hold,
    }
}

fn pickup_dock_approach(cond: TransitionCondition) -> Step {
    on_success(
        cond,
        Step::Advance {
            to: State::Verify,
            action: "Approach Complete",
        },
    )
}

fn pickup_verify(cond: TransitionCondition) -> Step {
    match cond {
        TransitionCondition::Success => Step::Advance {
            to: State::Lock,
            action: "Docking Pose Achieved",
        },
        TransitionCondition::Failure => Step::Advance {
            to: State::Retrace,
            action: "Error in Pose",
        },
        TransitionCondition::None => Step::Hold,
    }
}

fn pickup_retrace(cond: TransitionCondition) -> Step {
    on_success(
        cond,
        Step::Advance {
            to: State::DockApproach,
            action: "Retrace Complete",
        },
    )
}

fn pickup_lock(cond: TransitionCondition) -> Step {
    on_success(
        cond,
        Step::Finish {
            action: "Locking Complete",
        },
    )
}

// ═══════════════════════════════════════════════════════════════════════════
//  DROP OFF
// ═══════════════════════════════════════════════════════════════════════════

fn drop_off_p2p(cond: TransitionCondition) -> Step {
    on_success(
        cond,
        Step::Advance {
            to: State::UndockApproach,
            action: "Destination Reached",
        },
    )
}

fn drop_off_undock_approach(cond: TransitionCondition) -> Step {
    on_success(
        cond,
        Step::Advance {
            to: State::Unlock,
            action: "Approach Complete",
        },
    )
}

fn drop_off_unlock(cond: TransitionCondition) -> Step {
    on_success(
        cond,
        Step::Finish {
            action: "Unlocking Complete",
        },
    )
}
