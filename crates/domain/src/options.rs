//! Entry options — persisted settings scoped to one integration instance.
//!
//! Options are an open key/value mapping; the power adjustment owns the
//! [`AUTOMATION_ACTIVE`] key and must leave every other key untouched.

use serde::{Deserialize, Serialize};

/// Option key holding the power-adjustment on/off flag.
pub const AUTOMATION_ACTIVE: &str = "automation_active";

/// Option mapping for a single config entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryOptions(serde_json::Map<String, serde_json::Value>);

impl EntryOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the power adjustment is switched on.
    ///
    /// A missing or non-boolean value reads as `false`.
    #[must_use]
    pub fn automation_active(&self) -> bool {
        self.0
            .get(AUTOMATION_ACTIVE)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    /// Overwrite only the [`AUTOMATION_ACTIVE`] key.
    pub fn set_automation_active(&mut self, active: bool) {
        self.0
            .insert(AUTOMATION_ACTIVE.to_string(), serde_json::Value::Bool(active));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Insert or replace an option, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Option<serde_json::Value> {
        self.0.insert(key.into(), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, serde_json::Value)> for EntryOptions {
    fn from_iter<I: IntoIterator<Item = (String, serde_json::Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
