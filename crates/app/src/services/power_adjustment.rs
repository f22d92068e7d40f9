//! Power adjustment — grid-responsive throttling of the miner's power limit.
//!
//! The controller follows the grid-consumption sensor through a
//! [`StateChangeSource`] subscription and feeds every reading into a
//! [`PowerRegulator`]. When an excursion outlasts the dwell time, the
//! miner's power-limit number receives a `set_value` call.
//!
//! The on/off flag lives in the entry's options under `automation_active`
//! and is restored by [`setup`](PowerAdjustment::setup). The subscription is
//! held iff the flag is set.

use gridminer_domain::entity::EntityState;
use gridminer_domain::error::GridMinerError;
use gridminer_domain::event::StateChangedEvent;
use gridminer_domain::power_adjustment::{PowerAdjustmentConfig, PowerRegulator};
use gridminer_domain::service::ServiceCall;
use gridminer_domain::time::Timestamp;

use crate::ports::{EntitySubscription, OptionsStore, ServiceCaller, StateChangeSource};

/// Hysteresis controller for one config entry.
pub struct PowerAdjustment<S, C, O> {
    entry_id: String,
    config: PowerAdjustmentConfig,
    source: S,
    caller: C,
    store: O,
    regulator: PowerRegulator,
    automation_active: bool,
    subscription: Option<EntitySubscription>,
}

impl<S, C, O> PowerAdjustment<S, C, O>
where
    S: StateChangeSource,
    C: ServiceCaller,
    O: OptionsStore,
{
    /// Create an idle controller. Call [`setup`](Self::setup) before use.
    pub fn new(
        entry_id: impl Into<String>,
        config: PowerAdjustmentConfig,
        source: S,
        caller: C,
        store: O,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            config,
            source,
            caller,
            store,
            regulator: PowerRegulator::new(),
            automation_active: false,
            subscription: None,
        }
    }

    /// Restore the persisted flag and subscribe if it is set.
    ///
    /// # Errors
    ///
    /// Propagates the store's error if the options cannot be loaded.
    pub async fn setup(&mut self) -> Result<(), GridMinerError> {
        let options = self.store.load(&self.entry_id).await?;
        self.automation_active = options.automation_active();
        if self.automation_active {
            self.start();
        }
        tracing::info!(
            entry_id = %self.entry_id,
            automation_active = self.automation_active,
            sensor = %self.config.grid_consumption_entity,
            "power adjustment set up"
        );
        Ok(())
    }

    /// Subscribe to the grid-consumption sensor.
    ///
    /// Does nothing when a subscription is already held.
    pub fn start(&mut self) {
        if self.subscription.is_some() {
            tracing::debug!(entry_id = %self.entry_id, "already subscribed");
            return;
        }
        self.subscription = Some(self.source.subscribe(&self.config.grid_consumption_entity));
        tracing::debug!(
            entry_id = %self.entry_id,
            sensor = %self.config.grid_consumption_entity,
            "subscribed to grid consumption"
        );
    }

    /// Release the subscription, if any.
    pub fn stop(&mut self) {
        if self.subscription.take().is_some() {
            tracing::debug!(entry_id = %self.entry_id, "unsubscribed from grid consumption");
        }
    }

    /// Switch the automation on or off and persist the choice.
    ///
    /// Only the `automation_active` option is overwritten; other options of
    /// the entry are preserved.
    ///
    /// # Errors
    ///
    /// Propagates the store's error if loading or saving the options fails.
    /// The in-memory flag and subscription have already changed by then.
    pub async fn toggle(&mut self, active: bool) -> Result<(), GridMinerError> {
        self.automation_active = active;
        if active {
            self.start();
        } else {
            self.stop();
        }

        let mut options = self.store.load(&self.entry_id).await?;
        options.set_automation_active(active);
        self.store.save(&self.entry_id, &options).await?;

        tracing::info!(entry_id = %self.entry_id, active, "power automation toggled");
        Ok(())
    }

    /// Feed a new grid-consumption state observed at `now`.
    ///
    /// Missing states and the `unknown`/`unavailable` sentinels are ignored.
    /// Returns the power limit that was applied, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GridMinerError::Reading`] for a non-numeric state (the
    /// excursion timers are left untouched) and propagates the caller's
    /// error when setting the power limit fails.
    pub async fn handle_grid_consumption_change(
        &mut self,
        new_state: Option<&EntityState>,
        now: Timestamp,
    ) -> Result<Option<u32>, GridMinerError> {
        let Some(state) = new_state else {
            tracing::debug!("grid consumption has no state, ignoring");
            return Ok(None);
        };
        let Some(consumption) = state.numeric_value()? else {
            tracing::debug!(%state, "grid consumption not available, ignoring");
            return Ok(None);
        };

        let Some(command) = self.regulator.observe(&self.config, consumption, now) else {
            return Ok(None);
        };

        tracing::info!(
            consumption,
            region = %command.region,
            watts = command.watts,
            "dwell time exceeded, adjusting miner power"
        );
        self.set_miner_power(command.watts).await?;
        Ok(Some(command.watts))
    }

    /// Set the miner's power limit, waiting for the acknowledgment.
    ///
    /// # Errors
    ///
    /// Propagates the service caller's error.
    pub async fn set_miner_power(&self, watts: u32) -> Result<(), GridMinerError> {
        let call = ServiceCall::set_value(self.config.power_limit_entity.clone(), f64::from(watts));
        self.caller.call_service(call).await
    }

    /// Wait for the next change of the grid-consumption sensor.
    ///
    /// Never resolves while unsubscribed. Returns `None` when the source
    /// has shut down.
    pub async fn next_change(&mut self) -> Option<StateChangedEvent> {
        match self.subscription.as_mut() {
            Some(subscription) => subscription.recv().await,
            None => std::future::pending().await,
        }
    }

    /// Release every resource held for the host. The persisted flag is kept.
    pub fn teardown(&mut self) {
        self.stop();
        tracing::info!(entry_id = %self.entry_id, "power adjustment torn down");
    }
}

impl<S, C, O> PowerAdjustment<S, C, O> {
    #[must_use]
    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    #[must_use]
    pub fn config(&self) -> &PowerAdjustmentConfig {
        &self.config
    }

    #[must_use]
    pub fn automation_active(&self) -> bool {
        self.automation_active
    }

    /// Whether a subscription is currently held.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    #[must_use]
    pub fn last_high_power_time(&self) -> Option<Timestamp> {
        self.regulator.last_high_power_time()
    }

    #[must_use]
    pub fn last_low_power_time(&self) -> Option<Timestamp> {
        self.regulator.last_low_power_time()
    }
}
