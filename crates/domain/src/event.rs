//! Event — an immutable record of an entity changing state.
//!
//! The host fires one of these every time an entity's state is written,
//! carrying both the previous and the new state. Either side may be absent
//! (entity just created, or just removed).

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, EntityState};
use crate::time::{Timestamp, now};

/// A state-change notification for a single entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChangedEvent {
    pub entity_id: EntityId,
    pub old_state: Option<EntityState>,
    pub new_state: Option<EntityState>,
    /// When the host observed the change.
    pub timestamp: Timestamp,
}

impl StateChangedEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(
        entity_id: EntityId,
        old_state: Option<EntityState>,
        new_state: Option<EntityState>,
    ) -> Self {
        Self::at(entity_id, old_state, new_state, now())
    }

    /// Create an event with an explicit timestamp.
    #[must_use]
    pub fn at(
        entity_id: EntityId,
        old_state: Option<EntityState>,
        new_state: Option<EntityState>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            entity_id,
            old_state,
            new_state,
            timestamp,
        }
    }
}

impl std::fmt::Display for StateChangedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |state: &Option<EntityState>| {
            state
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string)
        };
        write!(
            f,
            "{}: {} -> {}",
            self.entity_id,
            show(&self.old_state),
            show(&self.new_state)
        )
    }
}
