//! Hysteresis/debounce state machine driving the power limit.

use super::{PowerAdjustmentConfig, Region};
use crate::time::Timestamp;

/// Request to move the miner to a new power limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerCommand {
    pub watts: u32,
    /// Region whose excursion produced the command.
    pub region: Region,
}

/// Tracks the current high or low excursion.
///
/// At most one of the two start times is set at any time: entering one
/// region clears the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerRegulator {
    last_high_power_time: Option<Timestamp>,
    last_low_power_time: Option<Timestamp>,
}

impl PowerRegulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of the current high excursion, if any.
    #[must_use]
    pub fn last_high_power_time(&self) -> Option<Timestamp> {
        self.last_high_power_time
    }

    /// Start of the current low excursion, if any.
    #[must_use]
    pub fn last_low_power_time(&self) -> Option<Timestamp> {
        self.last_low_power_time
    }

    /// Forget any excursion in progress.
    pub fn reset(&mut self) {
        self.last_high_power_time = None;
        self.last_low_power_time = None;
    }

    /// Feed one consumption reading observed at `now`.
    ///
    /// The first reading of an excursion only records its start. Any later
    /// reading in the same region once `dwell_time` has elapsed yields a
    /// command. The start is kept after firing, so every further reading in
    /// that region fires again until the excursion ends.
    pub fn observe(
        &mut self,
        config: &PowerAdjustmentConfig,
        consumption: f64,
        now: Timestamp,
    ) -> Option<PowerCommand> {
        let region = config.classify(consumption);
        let (current, other) = match region {
            Region::High => (&mut self.last_high_power_time, &mut self.last_low_power_time),
            Region::Low => (&mut self.last_low_power_time, &mut self.last_high_power_time),
            Region::Neutral => {
                self.reset();
                return None;
            }
        };

        let command = match *current {
            None => {
                *current = Some(now);
                None
            }
            Some(started) if now - started >= config.dwell_time() => config
                .limit_for(region)
                .map(|watts| PowerCommand { watts, region }),
            Some(_) => None,
        };
        *other = None;
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn at(minutes: i64) -> Timestamp {
        t0() + TimeDelta::minutes(minutes)
    }

    fn high(watts: u32) -> Option<PowerCommand> {
        Some(PowerCommand {
            watts,
            region: Region::High,
        })
    }

    fn low(watts: u32) -> Option<PowerCommand> {
        Some(PowerCommand {
            watts,
            region: Region::Low,
        })
    }

    #[test]
    fn should_start_high_excursion_without_firing() {
        let config = PowerAdjustmentConfig::default();
        let mut regulator = PowerRegulator::new();

        assert_eq!(regulator.observe(&config, 5.0, at(0)), None);
        assert_eq!(regulator.last_high_power_time(), Some(at(0)));
        assert_eq!(regulator.last_low_power_time(), None);
    }

    #[test]
    fn should_not_fire_before_dwell_time_elapses() {
        let config = PowerAdjustmentConfig::default();
        let mut regulator = PowerRegulator::new();

        regulator.observe(&config, 5.0, at(0));
        let almost = at(30) - TimeDelta::seconds(1);
        assert_eq!(regulator.observe(&config, 5.0, almost), None);
    }

    #[test]
    fn should_fire_high_limit_at_exactly_dwell_time() {
        let config = PowerAdjustmentConfig::default();
        let mut regulator = PowerRegulator::new();

        regulator.observe(&config, 5.0, at(0));
        assert_eq!(regulator.observe(&config, 5.0, at(30)), high(500));
    }

    #[test]
    fn should_fire_low_limit_after_sustained_surplus() {
        let config = PowerAdjustmentConfig::default();
        let mut regulator = PowerRegulator::new();

        assert_eq!(regulator.observe(&config, -3.0, at(0)), None);
        assert_eq!(regulator.observe(&config, 0.0, at(20)), None);
        assert_eq!(regulator.observe(&config, -1.0, at(45)), low(100));
        assert_eq!(regulator.last_low_power_time(), Some(at(0)));
    }

    #[test]
    fn should_fire_again_on_every_reading_after_dwell_time() {
        let config = PowerAdjustmentConfig::default();
        let mut regulator = PowerRegulator::new();

        regulator.observe(&config, 5.0, at(0));
        assert_eq!(regulator.observe(&config, 5.0, at(31)), high(500));
        assert_eq!(regulator.observe(&config, 6.0, at(32)), high(500));
        assert_eq!(regulator.last_high_power_time(), Some(at(0)));
    }

    #[test]
    fn should_clear_high_excursion_when_entering_low_region() {
        let config = PowerAdjustmentConfig::default();
        let mut regulator = PowerRegulator::new();

        regulator.observe(&config, 5.0, at(0));
        regulator.observe(&config, -1.0, at(5));

        assert_eq!(regulator.last_high_power_time(), None);
        assert_eq!(regulator.last_low_power_time(), Some(at(5)));
    }

    #[test]
    fn should_restart_high_excursion_after_a_flip() {
        let config = PowerAdjustmentConfig::default();
        let mut regulator = PowerRegulator::new();

        regulator.observe(&config, 5.0, at(0));
        regulator.observe(&config, -1.0, at(29));
        assert_eq!(regulator.observe(&config, 5.0, at(31)), None);
        assert_eq!(regulator.last_high_power_time(), Some(at(31)));
        assert_eq!(regulator.last_low_power_time(), None);
    }

    #[test]
    fn should_reset_both_excursions_in_neutral_band() {
        let config = PowerAdjustmentConfig {
            high_threshold: 100.0,
            low_threshold: -100.0,
            ..PowerAdjustmentConfig::default()
        };
        let mut regulator = PowerRegulator::new();

        regulator.observe(&config, 150.0, at(0));
        assert_eq!(regulator.observe(&config, 50.0, at(40)), None);
        assert_eq!(regulator, PowerRegulator::new());
    }

    #[test]
    fn should_not_fire_when_clock_goes_backwards() {
        let config = PowerAdjustmentConfig::default();
        let mut regulator = PowerRegulator::new();

        regulator.observe(&config, 5.0, at(60));
        assert_eq!(regulator.observe(&config, 5.0, at(0)), None);
    }

    #[test]
    fn should_fire_on_second_reading_when_dwell_time_is_zero() {
        let config = PowerAdjustmentConfig {
            dwell_time_secs: 0,
            ..PowerAdjustmentConfig::default()
        };
        let mut regulator = PowerRegulator::new();

        assert_eq!(regulator.observe(&config, 5.0, at(0)), None);
        assert_eq!(regulator.observe(&config, 5.0, at(0)), high(500));
    }

    #[test]
    fn should_follow_documented_scenario() {
        let config = PowerAdjustmentConfig::default();
        let mut regulator = PowerRegulator::new();

        assert_eq!(regulator.observe(&config, 5.0, at(0)), None);
        assert_eq!(regulator.observe(&config, 3.0, at(10)), None);
        assert_eq!(regulator.observe(&config, 4.0, at(31)), high(500));
        assert_eq!(regulator.observe(&config, -1.0, at(32)), None);

        assert_eq!(regulator.last_high_power_time(), None);
        assert_eq!(regulator.last_low_power_time(), Some(at(32)));
    }
}
