//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `gridminer.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use gridminer_adapter_virtual::VirtualConfig;
use gridminer_domain::power_adjustment::PowerAdjustmentConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Config entry settings.
    pub entry: EntryConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Controller settings.
    pub power_adjustment: PowerAdjustmentSection,
    /// Simulated meter and miner.
    #[serde(rename = "virtual")]
    pub virtual_devices: VirtualConfig,
}

/// Config entry the controller belongs to.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Key under which the entry's options are persisted.
    pub entry_id: String,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// `[power_adjustment]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PowerAdjustmentSection {
    #[serde(flatten)]
    pub controller: PowerAdjustmentConfig,
    /// Force the automation on or off at startup. Unset keeps the
    /// persisted flag.
    pub enable_on_start: Option<bool>,
}

impl Config {
    /// Load configuration from `gridminer.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("gridminer.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GRIDMINER_ENTRY_ID") {
            self.entry.entry_id = val;
        }
        if let Ok(val) = std::env::var("GRIDMINER_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("GRIDMINER_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.entry.entry_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "entry_id must not be empty".to_string(),
            ));
        }
        self.power_adjustment
            .controller
            .validate()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        let devices = &self.virtual_devices;
        if !(devices.min_watts.is_finite() && devices.max_watts.is_finite())
            || devices.min_watts > devices.max_watts
        {
            return Err(ConfigError::Validation(format!(
                "virtual power range [{}, {}] is invalid",
                devices.min_watts, devices.max_watts
            )));
        }
        Ok(())
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            entry_id: "gridminer".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:gridminer.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "gridminerd=info,gridminer=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.entry.entry_id, "gridminer");
        assert_eq!(config.database.url, "sqlite:gridminer.db?mode=rwc");
        assert_eq!(config.logging.filter, "gridminerd=info,gridminer=info");
        assert_eq!(
            config.power_adjustment.controller,
            PowerAdjustmentConfig::default()
        );
        assert_eq!(config.power_adjustment.enable_on_start, None);
        assert!(config.virtual_devices.enabled);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.power_adjustment.controller.high_limit, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [entry]
            entry_id = 'abc123'

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [power_adjustment]
            grid_consumption_entity = 'sensor.house_grid'
            power_limit_entity = 'number.s19_limit'
            high_threshold = 200.0
            low_threshold = -200.0
            high_limit = 800
            low_limit = 1200
            dwell_time_secs = 600
            enable_on_start = true

            [virtual]
            enabled = false
            readings = ['300', '-500']
            interval_secs = 10
            min_watts = 100.0
            max_watts = 1500.0
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.entry.entry_id, "abc123");
        assert_eq!(config.database_url(), "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");

        let controller = &config.power_adjustment.controller;
        assert_eq!(controller.grid_consumption_entity.as_str(), "sensor.house_grid");
        assert_eq!(controller.power_limit_entity.as_str(), "number.s19_limit");
        assert_eq!(controller.high_limit, 800);
        assert_eq!(controller.low_limit, 1200);
        assert_eq!(controller.dwell_time_secs, 600);
        assert_eq!(config.power_adjustment.enable_on_start, Some(true));

        assert!(!config.virtual_devices.enabled);
        assert_eq!(config.virtual_devices.readings, vec!["300", "-500"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [power_adjustment]
            dwell_time_secs = 60
        ";
        let config: Config = toml::from_str(toml).unwrap();
        let controller = &config.power_adjustment.controller;
        assert_eq!(controller.dwell_time_secs, 60);
        assert_eq!(
            controller.grid_consumption_entity.as_str(),
            "sensor.pw_grid_consumption"
        );
        assert_eq!(config.entry.entry_id, "gridminer");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.entry.entry_id, "gridminer");
    }

    #[test]
    fn should_reject_empty_entry_id() {
        let mut config = Config::default();
        config.entry.entry_id = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_inverted_thresholds() {
        let mut config = Config::default();
        config.power_adjustment.controller.low_threshold = 10.0;
        config.power_adjustment.controller.high_threshold = -10.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_inverted_virtual_power_range() {
        let mut config = Config::default();
        config.virtual_devices.min_watts = 2000.0;
        config.virtual_devices.max_watts = 100.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_report_parse_error_for_invalid_entity_id() {
        let toml = "
            [power_adjustment]
            grid_consumption_entity = 'not an entity'
        ";
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
