//! Inbound command events.
//!
//! Produced by the external task-orchestration and navigation
//! collaborators and interpreted by the
//! [`ChassisService`](super::service::ChassisService).

use serde::{Deserialize, Serialize};

use crate::fsm::{State, TransitionCondition};

/// A new-task request carried by a command event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TaskRequest {
    Standby = 0,
    Pickup = 1,
    DropOff = 2,
    /// Pickup that enters the approach phase directly, skipping P2P and Identify.
    DirectApproachPickup = 3,
}

impl TryFrom<u8> for TaskRequest {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Standby),
            1 => Ok(Self::Pickup),
            2 => Ok(Self::DropOff),
            3 => Ok(Self::DirectApproachPickup),
            other => Err(other),
        }
    }
}

/// Progress report or task request addressed to one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEvent {
    /// The state the sender believes is current.  Events whose source
    /// no longer matches are dropped by ingress.
    pub source_state: State,
    /// Present only for new-task requests.
    pub request: Option<TaskRequest>,
    pub condition: TransitionCondition,
    /// Task parameter (pod ID or drop-off location).
    pub payload: u32,
}

impl CommandEvent {
    /// A progress report for `source_state`.
    pub const fn progress(source_state: State, condition: TransitionCondition) -> Self {
        Self {
            source_state,
            request: None,
            condition,
            payload: 0,
        }
    }

    /// A new-task request, addressed to Idle.
    pub const fn request(kind: TaskRequest, payload: u32) -> Self {
        Self {
            source_state: State::Idle,
            request: Some(kind),
            condition: TransitionCondition::None,
            payload,
        }
    }
}
