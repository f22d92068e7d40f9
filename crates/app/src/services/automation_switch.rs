//! Power automation switch — the on/off entity in front of the power adjustment.
//!
//! The switch never touches the controller directly: it sends a
//! [`SwitchCommand`] to the [`PowerAdjustmentRunner`](super::runner::PowerAdjustmentRunner)
//! owning it and waits for the outcome. `is_on` reads a watch value the
//! runner refreshes after every toggle.

use tokio::sync::{mpsc, oneshot, watch};

use gridminer_domain::entity::EntityId;
use gridminer_domain::error::GridMinerError;

/// Display name of the switch.
pub const SWITCH_NAME: &str = "Power Automation";

/// Request sent from the switch to the runner.
#[derive(Debug)]
pub struct SwitchCommand {
    pub active: bool,
    pub reply: oneshot::Sender<Result<(), GridMinerError>>,
}

/// Handle on the power automation switch. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PowerAutomationSwitch {
    unique_id: String,
    entity_id: EntityId,
    commands: mpsc::Sender<SwitchCommand>,
    state: watch::Receiver<bool>,
}

impl PowerAutomationSwitch {
    pub(crate) fn new(
        entry_id: &str,
        entity_id: EntityId,
        commands: mpsc::Sender<SwitchCommand>,
        state: watch::Receiver<bool>,
    ) -> Self {
        Self {
            unique_id: format!("{entry_id}_power_automation"),
            entity_id,
            commands,
            state,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        SWITCH_NAME
    }

    /// Stable id, unique per config entry.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    #[must_use]
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// Whether the power automation is currently active.
    #[must_use]
    pub fn is_on(&self) -> bool {
        *self.state.borrow()
    }

    /// Switch the automation on.
    ///
    /// # Errors
    ///
    /// Returns the toggle's error (persistence failure), or
    /// [`GridMinerError::Unavailable`] when the runner has stopped.
    pub async fn turn_on(&self) -> Result<(), GridMinerError> {
        self.set(true).await
    }

    /// Switch the automation off.
    ///
    /// # Errors
    ///
    /// Same as [`turn_on`](Self::turn_on).
    pub async fn turn_off(&self) -> Result<(), GridMinerError> {
        self.set(false).await
    }

    async fn set(&self, active: bool) -> Result<(), GridMinerError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(SwitchCommand { active, reply })
            .await
            .map_err(|_| GridMinerError::Unavailable("power adjustment runner"))?;
        outcome
            .await
            .map_err(|_| GridMinerError::Unavailable("power adjustment runner"))?
    }
}
