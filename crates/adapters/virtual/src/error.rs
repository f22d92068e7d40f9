//! Virtual adapter error types.

use gridminer_domain::error::GridMinerError;

/// Errors specific to the virtual devices.
#[derive(Debug, thiserror::Error)]
pub enum VirtualError {
    /// The simulated miner was switched offline.
    #[error("virtual miner is unreachable")]
    Unreachable,
}

impl From<VirtualError> for GridMinerError {
    fn from(err: VirtualError) -> Self {
        Self::Service(Box::new(err))
    }
}
