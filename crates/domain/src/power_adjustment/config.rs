//! Thresholds, limits and dwell time of the power adjustment.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use super::Region;
use crate::entity::EntityId;
use crate::error::ValidationError;
use crate::time::seconds;

/// Configuration of a power adjustment instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerAdjustmentConfig {
    /// Sensor reporting the grid consumption (positive = importing).
    pub grid_consumption_entity: EntityId,
    /// Number entity controlling the miner's power limit.
    pub power_limit_entity: EntityId,
    pub high_threshold: f64,
    pub low_threshold: f64,
    /// Watts applied after a sustained high excursion.
    pub high_limit: u32,
    /// Watts applied after a sustained low excursion.
    pub low_limit: u32,
    /// How long an excursion must last before acting, in seconds.
    pub dwell_time_secs: u64,
}

impl Default for PowerAdjustmentConfig {
    fn default() -> Self {
        Self {
            grid_consumption_entity: EntityId("sensor.pw_grid_consumption".to_string()),
            power_limit_entity: EntityId("number.miner_power_limit".to_string()),
            high_threshold: 0.0,
            low_threshold: 0.0,
            high_limit: 500,
            low_limit: 100,
            dwell_time_secs: 30 * 60,
        }
    }
}

impl PowerAdjustmentConfig {
    /// Check that the thresholds describe sensible regions.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFiniteThreshold`] for NaN/infinite
    /// thresholds and [`ValidationError::InvertedThresholds`] when the low
    /// threshold exceeds the high one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.high_threshold.is_finite() {
            return Err(ValidationError::NonFiniteThreshold {
                name: "high_threshold",
            });
        }
        if !self.low_threshold.is_finite() {
            return Err(ValidationError::NonFiniteThreshold {
                name: "low_threshold",
            });
        }
        if self.low_threshold > self.high_threshold {
            return Err(ValidationError::InvertedThresholds {
                low: self.low_threshold,
                high: self.high_threshold,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn dwell_time(&self) -> TimeDelta {
        seconds(self.dwell_time_secs)
    }

    /// Place a consumption reading in its region.
    #[must_use]
    pub fn classify(&self, consumption: f64) -> Region {
        if consumption > self.high_threshold {
            Region::High
        } else if consumption <= self.low_threshold {
            Region::Low
        } else {
            Region::Neutral
        }
    }

    /// Power limit to apply once an excursion in `region` has lasted long enough.
    #[must_use]
    pub fn limit_for(&self, region: Region) -> Option<u32> {
        match region {
            Region::High => Some(self.high_limit),
            Region::Low => Some(self.low_limit),
            Region::Neutral => None,
        }
    }
}
