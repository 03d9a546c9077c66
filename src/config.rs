//! Controller configuration parameters
//!
//! All tunable parameters for the chassis controller.
//! Values can be overridden from a JSON parameter file at startup.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Status publisher ---
    /// Status snapshot publish interval (milliseconds)
    pub publish_interval_ms: u32,

    // --- Health interlock ---
    /// Health-monitor token that counts as a pass; anything else is a failure
    pub health_pass_token: String,

    // --- Event queue ---
    /// Pending-event depth at which producers warn about backlog
    pub event_queue_warn_depth: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            publish_interval_ms: 100, // 10 Hz
            health_pass_token: String::from("Passed"),
            event_queue_warn_depth: 24,
        }
    }
}

impl ControllerConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<()> {
        if !(10..=10_000).contains(&self.publish_interval_ms) {
            return Err(Error::Config("publish_interval_ms must be within 10..=10000"));
        }
        if self.health_pass_token.trim().is_empty() {
            return Err(Error::Config("health_pass_token must not be empty"));
        }
        if self.event_queue_warn_depth == 0 || self.event_queue_warn_depth > crate::events::EVENT_QUEUE_CAP {
            return Err(Error::Config("event_queue_warn_depth must be within 1..=queue capacity"));
        }
        Ok(())
    }
}
