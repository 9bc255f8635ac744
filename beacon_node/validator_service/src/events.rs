use slog::{trace, Logger};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::SendError, Receiver, Sender};
use types::BeaconState;

pub use crate::config::DEFAULT_EVENT_CHANNEL_CAPACITY;

#[derive(Debug, Clone)]
pub enum EventKind {
    /// A new state became the head of the canonical chain.
    CanonicalStateChanged(Arc<BeaconState>),
}

/// Fans chain events out to every subscriber.
pub struct ChainEventHandler {
    canonical_state_tx: Sender<EventKind>,
    log: Logger,
}

impl ChainEventHandler {
    pub fn new(log: Logger) -> Self {
        Self::new_with_capacity(log, DEFAULT_EVENT_CHANNEL_CAPACITY)
    }

    pub fn new_with_capacity(log: Logger, capacity: usize) -> Self {
        let (canonical_state_tx, _) = broadcast::channel(capacity);

        Self {
            canonical_state_tx,
            log,
        }
    }

    pub fn register(&self, kind: EventKind) {
        let result = match kind {
            EventKind::CanonicalStateChanged(state) => self
                .canonical_state_tx
                .send(EventKind::CanonicalStateChanged(state))
                .map(|count| trace!(self.log, "Registering canonical state event"; "receiver_count" => count)),
        };
        if let Err(SendError(EventKind::CanonicalStateChanged(state))) = result {
            trace!(self.log, "No receivers registered to listen for event"; "slot" => state.slot.as_u64());
        }
    }

    pub fn subscribe_canonical_state(&self) -> Receiver<EventKind> {
        self.canonical_state_tx.subscribe()
    }

    pub fn has_canonical_state_subscribers(&self) -> bool {
        self.canonical_state_tx.receiver_count() > 0
    }
}
