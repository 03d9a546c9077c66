//! Event ingress: the stale-event guard in front of the transition function.
//!
//! Senders race with a state machine that may already have moved on, and
//! they resend until they observe the state they want.  An event is only
//! admitted if the interlock is active and its `source_state` matches the
//! current state.  Everything else is dropped silently; there are no
//! sequence numbers and no queueing of late events.

use log::debug;

use crate::app::commands::CommandEvent;
use crate::fsm::State;

/// Why an event was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// No health signal has been observed yet.
    InterlockInactive,
    /// The event addresses a state the machine has already left.
    StaleSource { current: State, source: State },
}

/// Screen an event against the interlock and the current state.
pub fn screen(interlock_active: bool, current: State, event: &CommandEvent) -> Result<(), DropReason> {
    if !interlock_active {
        return Err(DropReason::InterlockInactive);
    }
    if event.source_state != current {
        return Err(DropReason::StaleSource {
            current,
            source: event.source_state,
        });
    }
    Ok(())
}

/// Forward `event` unchanged if it passes [`screen`].  Drops are logged
/// here and the reason is handed back for the caller's counters.
pub fn admit(interlock_active: bool, current: State, event: CommandEvent) -> Result<CommandEvent, DropReason> {
    screen(interlock_active, current, &event).map(|()| event).inspect_err(|reason| {
        debug!("Ingress: dropped {:?} ({:?})", event, reason);
    })
}
