//! Service — a command addressed to an entity of a given domain.
//!
//! Examples: `number.set_value`, `switch.turn_on`.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// A single invocation of a host service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub entity_id: EntityId,
    /// Extra parameters (a JSON object).
    #[serde(default)]
    pub data: serde_json::Value,
    /// Wait for the service to complete before returning.
    #[serde(default)]
    pub blocking: bool,
}

impl ServiceCall {
    /// `number.set_value` on `entity_id`, blocking until acknowledged.
    #[must_use]
    pub fn set_value(entity_id: EntityId, value: f64) -> Self {
        Self {
            domain: "number".to_string(),
            service: "set_value".to_string(),
            entity_id,
            data: serde_json::json!({ "value": value }),
            blocking: true,
        }
    }

    /// Whether this call targets `domain.service`.
    #[must_use]
    pub fn is(&self, domain: &str, service: &str) -> bool {
        self.domain == domain && self.service == service
    }

    /// The numeric `value` parameter, if any.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.data.get("value").and_then(serde_json::Value::as_f64)
    }
}

impl std::fmt::Display for ServiceCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}({})", self.domain, self.service, self.entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit() -> EntityId {
        EntityId::new("number.miner_power_limit").unwrap()
    }

    #[test]
    fn should_build_blocking_set_value_call() {
        let call = ServiceCall::set_value(limit(), 500.0);
        assert!(call.is("number", "set_value"));
        assert!(call.blocking);
        assert_eq!(call.value(), Some(500.0));
        assert_eq!(call.data, serde_json::json!({"value": 500.0}));
    }

    #[test]
    fn should_display_domain_service_and_target() {
        let call = ServiceCall::set_value(limit(), 100.0);
        assert_eq!(call.to_string(), "number.set_value(number.miner_power_limit)");
    }

    #[test]
    fn should_return_none_when_value_missing() {
        let call: ServiceCall = serde_json::from_value(serde_json::json!({
            "domain": "number",
            "service": "set_value",
            "entity_id": "number.miner_power_limit"
        }))
        .unwrap();
        assert!(call.value().is_none());
        assert!(!call.blocking);
    }
}
