//! Serde models of the inbound wire messages.
//!
//! One JSON object per line, discriminated by `kind`:
//!
//! ```text
//! {"kind":"health","status":"Passed"}
//! {"kind":"command","source_state":"idle","operation_mode":"pickup","payload":7}
//! {"kind":"command","source_state":"p2p","condition":"success"}
//! ```

use serde::{Deserialize, Serialize};

use crate::app::commands::{CommandEvent, TaskRequest};
use crate::events::Event;
use crate::fsm::{State, TransitionCondition};
use crate::safety::HealthSignal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundFrame {
    /// Health-monitor token (`"Passed"` or anything else).
    Health { status: String },
    /// Progress report or new-task request.
    Command {
        source_state: State,
        #[serde(default)]
        operation_mode: Option<TaskRequest>,
        #[serde(default = "no_condition")]
        condition: TransitionCondition,
        #[serde(default)]
        payload: u32,
    },
}

fn no_condition() -> TransitionCondition {
    TransitionCondition::None
}

impl InboundFrame {
    /// Convert into a queue event.  `pass_token` decides health polarity.
    pub fn into_event(self, pass_token: &str) -> Event {
        match self {
            Self::Health { status } => Event::Health(HealthSignal::from_token(&status, pass_token)),
            Self::Command {
                source_state,
                operation_mode,
                condition,
                payload,
            } => Event::Command(CommandEvent {
                source_state,
                request: operation_mode,
                condition,
                payload,
            }),
        }
    }
}
