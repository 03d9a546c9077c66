//! Controller event queue.
//!
//! Events are produced by:
//! - the inbound transport (health signals, command events)
//! - the publish ticker (fixed-cadence status ticks)
//! - the transport on end-of-input (shutdown)
//!
//! Events are consumed by a single dispatch loop, which applies each one
//! to completion before taking the next.  That loop is the only code that
//! touches the status record, so a health preemption can never interleave
//! with a half-applied command transition.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Health      │────▶│              │     │               │
//! │ Commands    │────▶│  Event Queue │────▶│ Dispatch Loop │
//! │ Ticker      │────▶│  (bounded)   │     │  (consumer)   │
//! └─────────────┘     └──────────────┘     └───────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use log::warn;

use crate::app::commands::CommandEvent;
use crate::safety::HealthSignal;

/// Maximum number of pending events.
pub const EVENT_QUEUE_CAP: usize = 32;

/// Everything the dispatch loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Health-monitor reading.
    Health(HealthSignal),
    /// Progress report or task request.
    Command(CommandEvent),
    /// Status publish cadence fired.
    PublishTick,
    /// Inbound transport closed.
    Shutdown,
}

/// Bounded multi-producer queue in front of the dispatch loop.
///
/// Inbound frames use [`send`](Self::send) and wait for space: a health
/// signal must reach the interlock on every delivery.  The publish ticker
/// uses [`try_push`](Self::try_push); a dropped tick is covered by the next.
pub struct EventQueue {
    channel: Channel<CriticalSectionRawMutex, Event, EVENT_QUEUE_CAP>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    /// Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Push an event.  Returns `false` if the queue is full (event dropped).
    pub fn try_push(&self, event: Event) -> bool {
        match self.channel.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                warn!("Event queue full, dropping {:?}", dropped);
                false
            }
        }
    }

    /// Push an event, waiting while the queue is full.
    pub async fn send(&self, event: Event) {
        self.channel.send(event).await;
    }

    /// Pop the next event, or `None` if the queue is empty.
    pub fn try_pop(&self) -> Option<Event> {
        self.channel.try_receive().ok()
    }

    /// Wait for the next event.
    pub async fn receive(&self) -> Event {
        self.channel.receive().await
    }

    /// Drain all pending events into a callback, in FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(Event)) {
        while let Some(event) = self.try_pop() {
            handler(event);
        }
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}
