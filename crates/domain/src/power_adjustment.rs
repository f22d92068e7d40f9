//! Power adjustment — throttle the miner from the home's grid consumption.
//!
//! Consumption is split into three regions by two thresholds:
//!
//! | Region | Condition | Effect after the dwell time |
//! |--------|-----------|-----------------------------|
//! | [`Region::High`] | `g > high_threshold` | set the miner to `high_limit` |
//! | [`Region::Low`] | `g <= low_threshold` | set the miner to `low_limit` |
//! | [`Region::Neutral`] | anything in between | nothing, both excursions reset |
//!
//! [`PowerRegulator`] keeps track of how long consumption has stayed in the
//! current region and tells the caller when to issue a [`PowerCommand`].

mod config;
mod regulator;

pub use config::PowerAdjustmentConfig;
pub use regulator::{PowerCommand, PowerRegulator};

use serde::{Deserialize, Serialize};

/// Consumption band a reading falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    High,
    Low,
    Neutral,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => f.write_str("high"),
            Self::Low => f.write_str("low"),
            Self::Neutral => f.write_str("neutral"),
        }
    }
}
