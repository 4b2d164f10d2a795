//! The broadcast channel the store announces writes on.

use tokio::sync::broadcast::{
    self,
    error::{RecvError, SendError},
};

use crate::{auth::UserID, transaction::Transaction};

/// Something that changed in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A user recorded a new transaction.
    TransactionAdded {
        /// The user that owns the transaction.
        user_id: UserID,
        /// The transaction as it was stored.
        transaction: Transaction,
    },
}

/// Publishes [StoreEvent]s to any number of subscribers.
///
/// Cloning shares the underlying channel.
#[derive(Debug, Clone)]
pub struct StoreEvents {
    sender: broadcast::Sender<StoreEvent>,
}

impl StoreEvents {
    /// Create a channel that buffers up to `capacity` events per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);

        Self { sender }
    }

    /// Send `event` to every current subscriber.
    ///
    /// Publishing with no subscribers is not an error, the event is dropped.
    pub fn publish(&self, event: StoreEvent) {
        match self.sender.send(event) {
            Ok(receivers) => tracing::debug!("published store event to {receivers} subscribers"),
            Err(SendError(event)) => tracing::trace!("no subscribers for {event:?}"),
        }
    }

    /// Start receiving events published from now on.
    pub fn subscribe(&self) -> EventStream {
        tracing::debug!("new store event subscriber");

        EventStream {
            receiver: self.sender.subscribe(),
        }
    }

    /// The number of live [EventStream]s.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A subscription to [StoreEvents].
///
/// Dropping the stream unsubscribes.
#[derive(Debug)]
pub struct EventStream {
    receiver: broadcast::Receiver<StoreEvent>,
}

impl EventStream {
    /// Wait for the next event.
    ///
    /// Events missed because this subscriber fell too far behind are skipped.
    /// Returns `None` once every [StoreEvents] handle has been dropped.
    pub async fn next(&mut self) -> Option<StoreEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("store event subscriber lagged, skipped {skipped} events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        tracing::debug!("store event subscriber dropped");
    }
}
