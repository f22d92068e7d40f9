//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use gridminer_domain::entity::{EntityId, EntityState};
use gridminer_domain::error::GridMinerError;
use gridminer_domain::event::StateChangedEvent;

use crate::ports::{EntitySubscription, EventPublisher, StateChangeSource, StateWriter};

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped). Cloning yields another handle on the
/// same channel.
#[derive(Clone)]
pub struct InProcessEventBus {
    sender: broadcast::Sender<StateChangedEvent>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to every event on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe_all(&self) -> broadcast::Receiver<StateChangedEvent> {
        self.sender.subscribe()
    }

    /// Number of live receivers, filtered or not.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(
        &self,
        event: StateChangedEvent,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send {
        tracing::trace!(%event, "publishing state change");
        // Fails only when nobody is subscribed.
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}

impl StateChangeSource for InProcessEventBus {
    fn subscribe(&self, entity_id: &EntityId) -> EntitySubscription {
        EntitySubscription::new(entity_id.clone(), self.sender.subscribe())
    }
}

impl StateWriter for InProcessEventBus {
    fn write_state(
        &self,
        entity_id: &EntityId,
        state: EntityState,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send {
        self.publish(StateChangedEvent::new(entity_id.clone(), None, Some(state)))
    }
}
