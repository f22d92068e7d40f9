//! Virtual devices configuration.

use std::time::Duration;

use serde::Deserialize;

use gridminer_domain::entity::EntityState;

/// Configuration for the simulated meter and miner.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VirtualConfig {
    /// Wire the virtual devices into the daemon.
    pub enabled: bool,
    /// Consumption states replayed in a loop by the meter (e.g. `"120.5"`,
    /// `"unavailable"`). Empty disables the replay.
    pub readings: Vec<String>,
    /// Delay between two replayed readings, in seconds.
    pub interval_secs: u64,
    /// Lowest power limit the simulated miner accepts.
    pub min_watts: f64,
    /// Highest power limit the simulated miner accepts.
    pub max_watts: f64,
}

impl Default for VirtualConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            readings: Vec::new(),
            interval_secs: 60,
            min_watts: 0.0,
            max_watts: 3500.0,
        }
    }
}

impl VirtualConfig {
    /// Replay readings as entity states.
    #[must_use]
    pub fn reading_states(&self) -> Vec<EntityState> {
        self.readings
            .iter()
            .map(|raw| EntityState::from(raw.as_str()))
            .collect()
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = VirtualConfig::default();
        assert!(config.enabled);
        assert!(config.readings.is_empty());
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert!((config.max_watts - 3500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            enabled = true
            readings = ["250", "unavailable", "-40"]
            interval_secs = 5
            max_watts = 1500.0
        "#;
        let config: VirtualConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.reading_states(),
            vec![
                EntityState::from("250"),
                EntityState::Unavailable,
                EntityState::from("-40"),
            ]
        );
        assert_eq!(config.interval(), Duration::from_secs(5));
        assert!((config.min_watts - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_clamp_zero_interval_to_one_second() {
        let config = VirtualConfig {
            interval_secs: 0,
            ..VirtualConfig::default()
        };
        assert_eq!(config.interval(), Duration::from_secs(1));
    }
}
