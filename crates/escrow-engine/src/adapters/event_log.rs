//! Event Log Adapter
//!
//! Append-only record of published events. A watcher on one ledger reads
//! revealed secrets from here to act on the other.

use crate::domain::{EscrowEvent, SecureSecret, SwapId};
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use tracing::debug;

/// In-memory event log.
#[derive(Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<EscrowEvent>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event so far.
    pub fn events(&self) -> Vec<EscrowEvent> {
        self.events.read().clone()
    }

    /// Events for one swap.
    pub fn events_for(&self, swap_id: &SwapId) -> Vec<EscrowEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.swap_id() == *swap_id)
            .cloned()
            .collect()
    }

    /// Secret revealed by a withdrawal of `swap_id`, if any.
    pub fn revealed_secret(&self, swap_id: &SwapId) -> Option<SecureSecret> {
        self.events.read().iter().find_map(|e| match e {
            EscrowEvent::Withdrawal {
                swap_id: id,
                secret,
                ..
            } if id == swap_id => Some(secret.clone()),
            _ => None,
        })
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, event: EscrowEvent) {
        debug!(topic = event.topic(), swap_id = %event.swap_id().short(), "[escrow] Event published");
        self.events.write().push(event);
    }
}
