//! Health interlock.
//!
//! Consumes the external health-monitor signal and converts it into
//! preemption and resumption of the task state machine.
//!
//! ## Lifecycle
//!
//! 1. Until the first health signal arrives the interlock is inactive:
//!    command events are dropped and no status is published.
//! 2. The first signal latches the interlock active for the rest of the
//!    process lifetime.
//! 3. A failing signal parks the current state and forces
//!    `EmergencyHandling`.  Repeated failures do not nest.
//! 4. A passing signal while in `EmergencyHandling` restores the parked
//!    state.  The operation mode is never touched.

use log::{error, info};

use crate::fsm::State;
use crate::fsm::context::StatusRecord;

/// One reading from the health monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthSignal {
    Pass,
    Fail,
}

impl HealthSignal {
    /// Interpret a raw monitor token.  Only an exact match of
    /// `pass_token` counts as a pass.
    pub fn from_token(token: &str, pass_token: &str) -> Self {
        if token == pass_token {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// State-machine effect of a health signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthChange {
    /// Entered `EmergencyHandling`; `suspended` will be restored on recovery.
    Preempted { suspended: State },
    /// Left `EmergencyHandling` back to `restored`.
    Resumed { restored: State },
}

/// Everything one [`HealthInterlock::apply`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterlockReport {
    /// This signal latched the interlock active.
    pub activated: bool,
    pub change: Option<HealthChange>,
}

/// One-way activation latch plus preempt/resume logic.
#[derive(Debug, Default)]
pub struct HealthInterlock {
    active: bool,
}

impl HealthInterlock {
    pub const fn new() -> Self {
        Self { active: false }
    }

    /// Whether the first health signal has been observed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Apply one health signal to the record.
    pub fn apply(&mut self, signal: HealthSignal, record: &mut StatusRecord) -> InterlockReport {
        let activated = !self.active;
        if activated {
            self.active = true;
            info!("Health monitor active");
        }

        record.set_health(signal.is_pass());

        let change = match signal {
            HealthSignal::Fail => record.preempt().map(|suspended| {
                error!("HEALTH FAILURE: suspending {}", suspended.label());
                HealthChange::Preempted { suspended }
            }),
            HealthSignal::Pass => record.resume().map(|restored| {
                info!("HEALTH RECOVERED: resuming {}", restored.label());
                HealthChange::Resumed { restored }
            }),
        };

        InterlockReport { activated, change }
    }
}
