//! # gridminerd — gridminer daemon
//!
//! Composition root that wires the adapters to the power adjustment and
//! runs it until shutdown.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the virtual meter and miner (adapters)
//! - Restore the controller from its persisted options
//! - Run the controller until Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use gridminer_adapter_storage_sqlite_sqlx::{Config as DatabaseConfig, SqliteOptionsStore};
use gridminer_adapter_virtual::{VirtualGridMeter, VirtualPowerLimit};
use gridminer_app::event_bus::InProcessEventBus;
use gridminer_app::ports::StateWriter;
use gridminer_app::services::power_adjustment::PowerAdjustment;
use gridminer_app::services::runner::PowerAdjustmentRunner;
use gridminer_domain::entity::{EntityId, EntityState};

const EVENT_BUS_CAPACITY: usize = 256;
const SWITCH_ENTITY_ID: &str = "switch.power_automation";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    if !config.virtual_devices.enabled {
        tracing::warn!("virtual devices disabled, no host to drive the miner");
        return Ok(());
    }

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let store = SqliteOptionsStore::new(db.pool().clone());

    // Event bus
    let event_bus = InProcessEventBus::new(EVENT_BUS_CAPACITY);

    // Devices
    let controller_config = config.power_adjustment.controller.clone();
    let meter = Arc::new(VirtualGridMeter::new(
        controller_config.grid_consumption_entity.clone(),
        event_bus.clone(),
    ));
    let miner = Arc::new(VirtualPowerLimit::new(
        controller_config.power_limit_entity.clone(),
        config.virtual_devices.min_watts,
        config.virtual_devices.max_watts,
        event_bus.clone(),
    ));

    // Controller
    let mut controller = PowerAdjustment::new(
        config.entry.entry_id.clone(),
        controller_config,
        event_bus.clone(),
        Arc::clone(&miner),
        store,
    );
    controller.setup().await?;

    let switch_entity = EntityId::new(SWITCH_ENTITY_ID)?;
    event_bus
        .write_state(
            &switch_entity,
            EntityState::from(controller.automation_active()),
        )
        .await?;

    let (runner, switch) = PowerAdjustmentRunner::new(controller, event_bus.clone(), switch_entity);
    let runner = tokio::spawn(runner.run(shutdown_signal()));

    match config.power_adjustment.enable_on_start {
        Some(true) => switch.turn_on().await?,
        Some(false) => switch.turn_off().await?,
        None => {}
    }
    tracing::info!(
        entry_id = %config.entry.entry_id,
        automation_active = switch.is_on(),
        "gridminerd started"
    );

    let replay = Arc::clone(&meter).replay(
        config.virtual_devices.reading_states(),
        config.virtual_devices.interval(),
    );

    let controller = runner.await?;
    if let Some(replay) = replay {
        replay.abort();
    }

    tracing::info!(
        automation_active = controller.automation_active(),
        miner_power_limit = ?miner.current_limit(),
        "gridminerd stopped"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
