//! Virtual miner power limit — a `number` entity driven by `set_value`.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use gridminer_app::ports::{EventPublisher, ServiceCaller};
use gridminer_domain::entity::{EntityId, EntityState};
use gridminer_domain::error::{GridMinerError, NotFoundError, ValidationError};
use gridminer_domain::event::StateChangedEvent;
use gridminer_domain::service::ServiceCall;

use super::lock;
use crate::error::VirtualError;

/// A simulated miner power-limit control.
///
/// Accepts `number.set_value` for its own entity only, within
/// `[min_watts, max_watts]`, and publishes every accepted value as a state
/// change.
pub struct VirtualPowerLimit<P> {
    entity_id: EntityId,
    min_watts: f64,
    max_watts: f64,
    publisher: P,
    reachable: AtomicBool,
    current: Mutex<Option<f64>>,
    history: Mutex<Vec<f64>>,
}

impl<P> VirtualPowerLimit<P> {
    #[must_use]
    pub fn new(entity_id: EntityId, min_watts: f64, max_watts: f64, publisher: P) -> Self {
        Self {
            entity_id,
            min_watts,
            max_watts,
            publisher,
            reachable: AtomicBool::new(true),
            current: Mutex::new(None),
            history: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Last accepted limit.
    #[must_use]
    pub fn current_limit(&self) -> Option<f64> {
        *lock(&self.current)
    }

    /// Every accepted limit, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<f64> {
        lock(&self.history).clone()
    }

    /// Simulate the miner going offline (or coming back).
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    fn accept(&self, call: &ServiceCall) -> Result<f64, GridMinerError> {
        if call.entity_id != self.entity_id {
            return Err(NotFoundError {
                entity: "Entity",
                id: call.entity_id.to_string(),
            }
            .into());
        }
        if !call.is("number", "set_value") {
            return Err(NotFoundError {
                entity: "Service",
                id: format!("{}.{}", call.domain, call.service),
            }
            .into());
        }
        let value = call.value().ok_or(ValidationError::MissingValue)?;
        if !(self.min_watts..=self.max_watts).contains(&value) {
            return Err(ValidationError::OutOfRange {
                value,
                min: self.min_watts,
                max: self.max_watts,
            }
            .into());
        }
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(VirtualError::Unreachable.into());
        }
        Ok(value)
    }
}

impl<P> ServiceCaller for VirtualPowerLimit<P>
where
    P: EventPublisher + Send + Sync,
{
    async fn call_service(&self, call: ServiceCall) -> Result<(), GridMinerError> {
        let value = self.accept(&call)?;
        let old_state = lock(&self.current).replace(value).map(EntityState::number);
        lock(&self.history).push(value);

        tracing::info!(entity_id = %self.entity_id, watts = value, "miner power limit set");

        self.publisher
            .publish(StateChangedEvent::new(
                self.entity_id.clone(),
                old_state,
                Some(EntityState::number(value)),
            ))
            .await
    }
}
