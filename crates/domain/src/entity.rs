//! Entity — a single observable/controllable value exposed by the host.
//!
//! Entities are addressed by a host-style id (`sensor.pw_grid_consumption`,
//! `number.miner_power_limit`, …) and carry a raw string state.

mod state;

pub use state::EntityState;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of the form `<domain>.<object_id>`.
///
/// Both parts are non-empty and made of lowercase ASCII letters, digits and
/// underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(pub(crate) String);

impl EntityId {
    /// Parse and validate an entity id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEntityId`] when `value` is not of the
    /// `<domain>.<object_id>` form.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let valid = match value.split_once('.') {
            Some((domain, object_id)) => is_slug(domain) && is_slug(object_id),
            None => false,
        };
        if valid {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidEntityId(value))
        }
    }

    /// The domain part (`sensor`, `number`, `switch`, …).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('.').map_or("", |(domain, _)| domain)
    }

    /// The part after the domain.
    #[must_use]
    pub fn object_id(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, object_id)| object_id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_slug(part: &str) -> bool {
    !part.is_empty()
        && part
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}
