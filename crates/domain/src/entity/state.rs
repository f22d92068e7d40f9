//! Entity state — the raw value an entity reports, classified.

use serde::{Deserialize, Serialize};

use crate::error::ReadingError;

/// State of an entity as reported by the host.
///
/// Hosts report states as strings; the well-known ones get their own
/// variant and everything else is kept verbatim in [`Value`](Self::Value).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityState {
    On,
    Off,
    #[default]
    Unknown,
    Unavailable,
    Value(String),
}

impl EntityState {
    /// Whether the entity is reachable (anything but [`Unavailable`](Self::Unavailable)).
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    /// Whether this is one of the "no reading" sentinels.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Unknown | Self::Unavailable)
    }

    /// Interpret the state as a number.
    ///
    /// Sentinels yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadingError::NotNumeric`] for `on`/`off` or any value that
    /// does not parse, and [`ReadingError::NotFinite`] for `nan`/`inf`.
    pub fn numeric_value(&self) -> Result<Option<f64>, ReadingError> {
        match self {
            Self::Unknown | Self::Unavailable => Ok(None),
            Self::On | Self::Off => Err(ReadingError::NotNumeric(self.to_string())),
            Self::Value(raw) => {
                let value: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ReadingError::NotNumeric(raw.clone()))?;
                if value.is_finite() {
                    Ok(Some(value))
                } else {
                    Err(ReadingError::NotFinite(raw.clone()))
                }
            }
        }
    }

    /// Build a numeric state.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<&str> for EntityState {
    fn from(raw: &str) -> Self {
        match raw {
            "on" => Self::On,
            "off" => Self::Off,
            "unknown" => Self::Unknown,
            "unavailable" => Self::Unavailable,
            other => Self::Value(other.to_string()),
        }
    }
}

impl From<String> for EntityState {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<bool> for EntityState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl From<EntityState> for String {
    fn from(state: EntityState) -> Self {
        match state {
            EntityState::Value(raw) => raw,
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Unknown => f.write_str("unknown"),
            Self::Unavailable => f.write_str("unavailable"),
            Self::Value(raw) => f.write_str(raw),
        }
    }
}
