//! Host time adapter.
//!
//! Monotonic process clock backed by `std::time::Instant`.

use core::time::Duration;
use std::time::Instant;

use crate::app::ports::TimePort;

/// Clock anchored at construction (process start in the binary).
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl TimePort for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
