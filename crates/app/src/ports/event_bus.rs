//! Event bus ports — publish state changes and subscribe to one entity.

use std::future::Future;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use gridminer_domain::entity::EntityId;
use gridminer_domain::error::GridMinerError;
use gridminer_domain::event::StateChangedEvent;

/// Publishes state-change events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(
        &self,
        event: StateChangedEvent,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: StateChangedEvent,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send {
        (**self).publish(event)
    }
}

/// Source of state-change notifications for individual entities.
pub trait StateChangeSource {
    /// Start receiving changes of `entity_id`.
    ///
    /// The subscription stays live for as long as the returned
    /// [`EntitySubscription`] is held; dropping it unsubscribes.
    fn subscribe(&self, entity_id: &EntityId) -> EntitySubscription;
}

impl<T: StateChangeSource> StateChangeSource for std::sync::Arc<T> {
    fn subscribe(&self, entity_id: &EntityId) -> EntitySubscription {
        (**self).subscribe(entity_id)
    }
}

/// Live subscription to the state changes of a single entity.
///
/// Owns its receiver exclusively, so releasing it is just dropping it.
#[derive(Debug)]
pub struct EntitySubscription {
    entity_id: EntityId,
    receiver: broadcast::Receiver<StateChangedEvent>,
}

impl EntitySubscription {
    /// Wrap a broadcast receiver, filtering for `entity_id`.
    #[must_use]
    pub fn new(entity_id: EntityId, receiver: broadcast::Receiver<StateChangedEvent>) -> Self {
        Self {
            entity_id,
            receiver,
        }
    }

    /// Entity this subscription follows.
    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Wait for the next change of the subscribed entity.
    ///
    /// Returns `None` once the source has shut down. Events missed because
    /// the subscriber fell behind are logged and skipped.
    pub async fn recv(&mut self) -> Option<StateChangedEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.entity_id == self.entity_id => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        entity_id = %self.entity_id,
                        skipped,
                        "subscriber lagged, state changes dropped"
                    );
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
