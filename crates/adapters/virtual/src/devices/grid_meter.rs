//! Virtual grid meter — publishes grid-consumption readings.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use gridminer_app::ports::EventPublisher;
use gridminer_domain::entity::{EntityId, EntityState};
use gridminer_domain::error::GridMinerError;
use gridminer_domain::event::StateChangedEvent;
use gridminer_domain::time::{Timestamp, now};

use super::lock;

/// A simulated consumption sensor.
pub struct VirtualGridMeter<P> {
    entity_id: EntityId,
    publisher: P,
    state: Mutex<Option<EntityState>>,
}

impl<P: EventPublisher> VirtualGridMeter<P> {
    #[must_use]
    pub fn new(entity_id: EntityId, publisher: P) -> Self {
        Self {
            entity_id,
            publisher,
            state: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Last reported state, if any.
    #[must_use]
    pub fn state(&self) -> Option<EntityState> {
        lock(&self.state).clone()
    }

    /// Report a new state observed now.
    ///
    /// # Errors
    ///
    /// Propagates the publisher's error.
    pub async fn report(&self, state: impl Into<EntityState>) -> Result<(), GridMinerError> {
        self.report_at(state, now()).await
    }

    /// Report a new state with an explicit observation time.
    ///
    /// # Errors
    ///
    /// Propagates the publisher's error.
    pub async fn report_at(
        &self,
        state: impl Into<EntityState>,
        timestamp: Timestamp,
    ) -> Result<(), GridMinerError> {
        let state = state.into();
        let old_state = lock(&self.state).replace(state.clone());
        let event = StateChangedEvent::at(self.entity_id.clone(), old_state, Some(state), timestamp);
        self.publisher.publish(event).await
    }
}

impl<P> VirtualGridMeter<P>
where
    P: EventPublisher + Send + Sync + 'static,
{
    /// Spawn a task reporting `readings` one after the other, every
    /// `interval`, starting over at the end.
    ///
    /// Returns `None` when there is nothing to replay.
    #[must_use]
    pub fn replay(
        self: Arc<Self>,
        readings: Vec<EntityState>,
        interval: Duration,
    ) -> Option<JoinHandle<()>> {
        if readings.is_empty() {
            return None;
        }
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            for state in readings.iter().cycle() {
                ticker.tick().await;
                tracing::debug!(entity_id = %self.entity_id, %state, "replaying reading");
                if let Err(err) = self.report(state.clone()).await {
                    tracing::warn!(error = %err, "failed to publish replayed reading");
                }
            }
        });
        Some(handle)
    }
}
