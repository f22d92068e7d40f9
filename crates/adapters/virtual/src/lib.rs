//! # gridminer-adapter-virtual
//!
//! Virtual/demo host adapter that stands in for the home-automation host
//! and the miner's control path.
//!
//! ## Provided devices
//!
//! | Device | Entity ID | Behaviour |
//! |--------|-----------|-----------|
//! | Grid meter | `sensor.pw_grid_consumption` | Publishes consumption readings (live or replayed) |
//! | Miner power limit | `number.miner_power_limit` | Accepts `number.set_value` within `[min_watts, max_watts]` |
//!
//! ## Dependency rule
//!
//! Depends on `gridminer-app` (port traits) and `gridminer-domain` only.

mod config;
mod devices;
mod error;

pub use config::VirtualConfig;
pub use devices::{VirtualGridMeter, VirtualPowerLimit};
pub use error::VirtualError;
