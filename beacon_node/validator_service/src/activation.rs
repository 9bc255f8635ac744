use crate::errors::Error;
use crate::eth1::Eth1BlockTimes;
use crate::events::EventKind;
use crate::metrics;
use crate::server::ValidatorServer;
use crate::status::{ValidatorStatus, ValidatorStatusEntry, ValidatorStatusResponse};
use futures::future::{Future, FutureExt};
use slog::{debug, warn};
use std::sync::Arc;
use store::Store;
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tokio::sync::mpsc::{self, Sender};
use tokio_stream::wrappers::ReceiverStream;
use types::{BeaconState, PublicKeyBytes};

/// One update on an activation stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationResponse {
    pub statuses: Vec<ActivationStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivationStatus {
    pub public_key: PublicKeyBytes,
    pub status: Result<ValidatorStatusResponse, Error>,
}

impl ActivationResponse {
    /// `true` once every requested key is `ACTIVE`.
    pub fn all_active(&self) -> bool {
        self.statuses.iter().all(|s| {
            matches!(&s.status, Ok(response) if response.status == ValidatorStatus::Active)
        })
    }
}

impl From<ValidatorStatusEntry> for ActivationStatus {
    fn from(entry: ValidatorStatusEntry) -> Self {
        Self {
            public_key: entry.public_key,
            status: entry.status,
        }
    }
}

type ActivationItem = Result<ActivationResponse, Error>;

enum Next {
    State(Arc<BeaconState>),
    Lagged(u64),
    Failed(Error),
    Cancelled,
    ConsumerGone,
    ChannelClosed,
}

enum Delivery {
    Sent,
    Cancelled,
    ConsumerGone,
}

impl<S: Store, T: Eth1BlockTimes> ValidatorServer<S, T> {
    /// Streams the statuses of `pubkeys` until all of them are active.
    ///
    /// The first item describes the head state. Each canonical state announced through
    /// `event_handler()` afterwards produces another item. The stream ends after the first
    /// item in which every key is `ACTIVE`, once `cancel` resolves, or after
    /// `Err(EventChannelClosed)` if the event channel shuts down.
    ///
    /// Cancellation is observed even while the stream is full. It appends a final
    /// `Err(ContextClosed)` when the stream has room for it, and otherwise just ends the stream
    /// after the items already buffered.
    ///
    /// Must be called from within a tokio runtime.
    pub fn wait_for_activation<F>(
        &self,
        pubkeys: Vec<PublicKeyBytes>,
        cancel: F,
    ) -> ReceiverStream<ActivationItem>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(std::cmp::max(1, self.config.activation_stream_capacity));
        // Subscribe before reading the head so no state announced in between is missed.
        let events = self.events.subscribe_canonical_state();
        let server = self.clone();

        tokio::spawn(async move {
            metrics::inc_gauge(&metrics::OPEN_ACTIVATION_STREAMS);
            server.stream_activation(pubkeys, events, cancel, tx).await;
            metrics::dec_gauge(&metrics::OPEN_ACTIVATION_STREAMS);
        });

        ReceiverStream::new(rx)
    }

    async fn stream_activation<F>(
        self,
        pubkeys: Vec<PublicKeyBytes>,
        mut events: Receiver<EventKind>,
        cancel: F,
        tx: Sender<ActivationItem>,
    ) where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = cancel.fuse();
        tokio::pin!(cancel);

        let mut next = match self.head_state() {
            Ok(state) => Next::State(Arc::new(state)),
            Err(e) => Next::Failed(e),
        };

        loop {
            let (item, is_last) = match next {
                Next::State(state) => {
                    let response = self.activation_response(&state, &pubkeys);
                    let all_active = response.all_active();
                    if all_active {
                        debug!(
                            self.log,
                            "All validators active";
                            "count" => pubkeys.len(),
                            "slot" => state.slot.as_u64(),
                        );
                    }
                    (Ok(response), all_active)
                }
                Next::Lagged(skipped) => {
                    warn!(
                        self.log,
                        "Activation stream fell behind";
                        "skipped_states" => skipped,
                    );
                    next = wait_for_next(&mut events, cancel.as_mut(), &tx).await;
                    continue;
                }
                Next::Failed(e) => (Err(e), true),
                Next::ChannelClosed => (Err(Error::EventChannelClosed), true),
                Next::Cancelled => {
                    debug!(self.log, "Activation stream cancelled");
                    // Never wait on a full stream once cancelled.
                    let _ = tx.try_send(Err(Error::ContextClosed));
                    return;
                }
                Next::ConsumerGone => {
                    debug!(self.log, "Activation stream receiver dropped");
                    return;
                }
            };

            next = match deliver(&tx, item, cancel.as_mut()).await {
                Delivery::Sent if is_last => return,
                Delivery::Sent => wait_for_next(&mut events, cancel.as_mut(), &tx).await,
                Delivery::Cancelled => Next::Cancelled,
                Delivery::ConsumerGone => Next::ConsumerGone,
            };
        }
    }

    pub(crate) fn activation_response(
        &self,
        state: &BeaconState,
        pubkeys: &[PublicKeyBytes],
    ) -> ActivationResponse {
        let (_, entries) = self.multiple_validator_status_at(state, pubkeys);

        ActivationResponse {
            statuses: entries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Waits for a stream slot and sends `item`, giving up as soon as `cancel` resolves.
async fn deliver<C>(tx: &Sender<ActivationItem>, item: ActivationItem, cancel: C) -> Delivery
where
    C: Future<Output = ()> + Unpin,
{
    tokio::select! {
        biased;
        _ = cancel => Delivery::Cancelled,
        permit = tx.reserve() => match permit {
            Ok(permit) => {
                permit.send(item);
                Delivery::Sent
            }
            Err(_) => Delivery::ConsumerGone,
        },
    }
}

/// Waits for the next canonical state, cancellation or the consumer going away.
async fn wait_for_next<C>(
    events: &mut Receiver<EventKind>,
    cancel: C,
    tx: &Sender<ActivationItem>,
) -> Next
where
    C: Future<Output = ()> + Unpin,
{
    tokio::select! {
        biased;
        _ = cancel => Next::Cancelled,
        _ = tx.closed() => Next::ConsumerGone,
        event = events.recv() => match event {
            Ok(EventKind::CanonicalStateChanged(state)) => Next::State(state),
            Err(RecvError::Lagged(skipped)) => Next::Lagged(skipped),
            Err(RecvError::Closed) => Next::ChannelClosed,
        },
    }
}
