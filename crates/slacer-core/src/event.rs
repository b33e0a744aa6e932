//! Event dispatcher
//!
//! Broadcasts application events (mesh loaded, load failed, ...) to any
//! number of subscribers without the publisher knowing who listens.

use std::fmt;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Identifier attached to every dispatcher, handy in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatcherId(Uuid);

impl fmt::Display for DispatcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dispatch({})", &self.0.to_string()[..8])
    }
}

/// Event dispatcher for publishing events to subscribers
#[derive(Clone)]
pub struct EventDispatcher<E: Clone> {
    id: DispatcherId,
    /// Broadcast sender channel.
    tx: broadcast::Sender<E>,
}

impl<E: Clone> EventDispatcher<E> {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size.max(1));
        Self {
            id: DispatcherId(Uuid::new_v4()),
            tx,
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of receivers reached. Publishing with nobody
    /// listening is not an error.
    pub fn publish(&self, event: E) -> usize {
        match self.tx.send(event) {
            Ok(count) => count,
            Err(_) => {
                tracing::trace!("{} has no subscribers", self.id);
                0
            }
        }
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Dispatcher identifier
    pub fn id(&self) -> DispatcherId {
        self.id
    }
}

impl<E: Clone> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new(100)
    }
}

impl<E: Clone> fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("id", &self.id)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
