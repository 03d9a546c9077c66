//! The status record threaded through every transition.
//!
//! `StatusRecord` is the single piece of mutable controller state.  It is
//! owned by the [`ChassisService`](crate::app::service::ChassisService)
//! and only ever mutated through the crate-private methods below, which
//! the transition function and the health interlock call while the
//! dispatch loop holds exclusive access.

use super::{OperationMode, State};

/// Shared status of the chassis task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    /// One-step transition history.
    previous_state: State,
    current_state: State,
    operation_mode: OperationMode,
    /// Last-known health interlock result.
    health_ok: bool,
    pod_attached: bool,
    /// Task parameter (pod ID or drop-off location).
    payload: u32,
    /// State to restore when leaving `EmergencyHandling`.
    /// `Some` exactly while `current_state == EmergencyHandling`.
    suspended: Option<State>,
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusRecord {
    /// Power-on record: idle in standby, health unknown, no pod.
    pub const fn new() -> Self {
        Self {
            previous_state: State::Idle,
            current_state: State::Idle,
            operation_mode: OperationMode::Standby,
            health_ok: false,
            pod_attached: false,
            payload: 0,
            suspended: None,
        }
    }

    pub fn previous_state(&self) -> State {
        self.previous_state
    }

    pub fn current_state(&self) -> State {
        self.current_state
    }

    pub fn operation_mode(&self) -> OperationMode {
        self.operation_mode
    }

    pub fn health_ok(&self) -> bool {
        self.health_ok
    }

    pub fn pod_attached(&self) -> bool {
        self.pod_attached
    }

    pub fn payload(&self) -> u32 {
        self.payload
    }

    /// The state parked by a health preemption, if any.
    pub fn suspended_state(&self) -> Option<State> {
        self.suspended
    }

    // -----------------------------------------------------------------------
    // Transitions (crate-private: only the core and the interlock write)
    // -----------------------------------------------------------------------

    pub(crate) fn advance(&mut self, to: State) {
        self.previous_state = self.current_state;
        self.current_state = to;
    }

    /// Accept a new task request from Idle/Standby.
    pub(crate) fn begin_task(&mut self, mode: OperationMode, payload: u32, first: State) {
        self.operation_mode = mode;
        self.payload = payload;
        self.advance(first);
    }

    /// Lock complete: back to Idle/Standby, awaiting lock confirmation.
    pub(crate) fn finish_pickup(&mut self) {
        self.advance(State::Idle);
        self.operation_mode = OperationMode::Standby;
    }

    /// Unlock complete: the pod has been released.
    pub(crate) fn finish_drop_off(&mut self) {
        self.advance(State::Idle);
        self.operation_mode = OperationMode::Standby;
        self.pod_attached = false;
        self.payload = 0;
    }

    /// Lock confirmation succeeded.
    pub(crate) fn confirm_lock(&mut self) {
        self.pod_attached = true;
        self.payload = 0;
        self.previous_state = self.current_state;
    }

    /// Lock confirmation failed: release whatever was half-latched.
    pub(crate) fn retry_undock(&mut self) {
        self.operation_mode = OperationMode::DropOff;
        self.advance(State::Unlock);
    }

    pub(crate) fn set_health(&mut self, ok: bool) {
        self.health_ok = ok;
    }

    /// Park the current state and enter `EmergencyHandling`.
    ///
    /// Returns the parked state, or `None` if already in emergency.
    pub(crate) fn preempt(&mut self) -> Option<State> {
        if self.current_state == State::EmergencyHandling {
            return None;
        }
        let parked = self.current_state;
        self.suspended = Some(parked);
        self.advance(State::EmergencyHandling);
        Some(parked)
    }

    /// Leave `EmergencyHandling` and restore the parked state.
    ///
    /// Returns the restored state, or `None` if not in emergency.
    pub(crate) fn resume(&mut self) -> Option<State> {
        if self.current_state != State::EmergencyHandling {
            return None;
        }
        let restored = self.suspended.take()?;
        self.current_state = restored;
        self.previous_state = State::EmergencyHandling;
        Some(restored)
    }

    #[cfg(test)]
    pub(crate) fn force_pod_attached(&mut self, attached: bool) {
        self.pod_attached = attached;
    }
}
