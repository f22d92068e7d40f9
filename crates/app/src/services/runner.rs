//! Runner — the single task that owns a [`PowerAdjustment`].
//!
//! Inputs arrive from three places: the switch (toggle commands), the
//! controller's own subscription (grid-consumption changes) and a shutdown
//! future. They are handled strictly one at a time, so the controller never
//! sees two callbacks in flight.

use std::future::Future;

use tokio::sync::{mpsc, watch};

use gridminer_domain::entity::{EntityId, EntityState};
use gridminer_domain::error::GridMinerError;
use gridminer_domain::event::StateChangedEvent;

use crate::ports::{OptionsStore, ServiceCaller, StateChangeSource, StateWriter};
use crate::services::automation_switch::{PowerAutomationSwitch, SwitchCommand};
use crate::services::power_adjustment::PowerAdjustment;

const COMMAND_CAPACITY: usize = 8;

enum Input {
    Shutdown,
    Command(SwitchCommand),
    CommandsClosed,
    Change(StateChangedEvent),
    SourceClosed,
}

/// Drives a [`PowerAdjustment`] from switch commands and state changes.
pub struct PowerAdjustmentRunner<S, C, O, W> {
    controller: PowerAdjustment<S, C, O>,
    writer: W,
    switch_entity: EntityId,
    commands: mpsc::Receiver<SwitchCommand>,
    state: watch::Sender<bool>,
}

impl<S, C, O, W> PowerAdjustmentRunner<S, C, O, W>
where
    S: StateChangeSource,
    C: ServiceCaller,
    O: OptionsStore,
    W: StateWriter,
{
    /// Wrap a controller that has already been [set up](PowerAdjustment::setup).
    ///
    /// Returns the runner and the switch entity bound to it.
    pub fn new(
        controller: PowerAdjustment<S, C, O>,
        writer: W,
        switch_entity: EntityId,
    ) -> (Self, PowerAutomationSwitch) {
        let (commands_tx, commands) = mpsc::channel(COMMAND_CAPACITY);
        let (state, state_rx) = watch::channel(controller.automation_active());
        let switch = PowerAutomationSwitch::new(
            controller.entry_id(),
            switch_entity.clone(),
            commands_tx,
            state_rx,
        );
        let runner = Self {
            controller,
            writer,
            switch_entity,
            commands,
            state,
        };
        (runner, switch)
    }

    /// Process inputs until `shutdown` resolves or the state source closes.
    ///
    /// The controller is torn down before being handed back.
    pub async fn run(
        self,
        shutdown: impl Future<Output = ()>,
    ) -> PowerAdjustment<S, C, O> {
        let Self {
            mut controller,
            writer,
            switch_entity,
            mut commands,
            state,
        } = self;
        tokio::pin!(shutdown);
        let mut commands_open = true;

        tracing::info!(
            entry_id = controller.entry_id(),
            automation_active = controller.automation_active(),
            "power adjustment runner started"
        );

        loop {
            let input = tokio::select! {
                biased;
                () = &mut shutdown => Input::Shutdown,
                command = commands.recv(), if commands_open => {
                    command.map_or(Input::CommandsClosed, Input::Command)
                }
                change = controller.next_change() => {
                    change.map_or(Input::SourceClosed, Input::Change)
                }
            };

            match input {
                Input::Shutdown => break,
                Input::Command(SwitchCommand { active, reply }) => {
                    let result = controller.toggle(active).await;
                    if let Err(err) = &result {
                        tracing::error!(error = %err, active, "failed to persist power automation");
                    }
                    let is_on = controller.automation_active();
                    state.send_replace(is_on);
                    if let Err(err) = writer
                        .write_state(&switch_entity, EntityState::from(is_on))
                        .await
                    {
                        tracing::warn!(error = %err, "failed to write switch state");
                    }
                    // The switch may have stopped waiting.
                    let _ = reply.send(result);
                }
                Input::CommandsClosed => {
                    tracing::debug!("every switch handle dropped");
                    commands_open = false;
                }
                Input::Change(event) => {
                    let outcome = controller
                        .handle_grid_consumption_change(event.new_state.as_ref(), event.timestamp)
                        .await;
                    match outcome {
                        Ok(_) => {}
                        Err(err @ GridMinerError::Reading(_)) => {
                            tracing::warn!(error = %err, %event, "ignoring grid consumption reading");
                        }
                        Err(err) => {
                            tracing::error!(error = %err, %event, "failed to adjust miner power");
                        }
                    }
                }
                Input::SourceClosed => {
                    tracing::warn!("grid consumption source closed");
                    break;
                }
            }
        }

        controller.teardown();
        controller
    }
}
