//! State writer port — push an entity's displayed state to the host.

use std::future::Future;

use gridminer_domain::entity::{EntityId, EntityState};
use gridminer_domain::error::GridMinerError;

/// Notifies the host that an entity's state should be re-rendered.
pub trait StateWriter {
    fn write_state(
        &self,
        entity_id: &EntityId,
        state: EntityState,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send;
}

impl<T: StateWriter + Send + Sync> StateWriter for std::sync::Arc<T> {
    fn write_state(
        &self,
        entity_id: &EntityId,
        state: EntityState,
    ) -> impl Future<Output = Result<(), GridMinerError>> + Send {
        (**self).write_state(entity_id, state)
    }
}
