//! Event payload composition.
//!
//! Outbound telemetry events carry the event name, caller fields, the
//! device mapping and any attribution slots the host has filled. This
//! module only builds the JSON object; sending it is the host's job.

use crate::attribution::AttributionSlots;
use crate::core::DeviceSnapshot;
use serde_json::{Map, Value};

/// JSON object for one telemetry event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPayload {
    fields: Map<String, Value>,
}

impl EventPayload {
    /// Start a payload for `event_name`.
    pub fn new(event_name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("event_name".to_string(), Value::from(event_name));
        Self { fields }
    }

    /// Set a caller field. Later writes to the same key win.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Merge every exported device key.
    pub fn with_device_info(mut self, snapshot: &DeviceSnapshot) -> Self {
        for (key, value) in snapshot.to_map() {
            self.fields.insert(key, Value::String(value));
        }
        self
    }

    /// Merge the filled attribution slots.
    pub fn with_attribution(mut self, slots: &AttributionSlots) -> Self {
        for (key, value) in slots.payload_entries() {
            self.fields
                .insert(key.to_string(), Value::String(value.to_string()));
        }
        self
    }

    pub fn event_name(&self) -> Option<&str> {
        self.fields.get("event_name").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.fields).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPlatform;

    #[test]
    fn test_payload_contains_event_and_device_info() {
        let snapshot = DeviceSnapshot::collect(&MockPlatform::new());
        let payload = EventPayload::new("Purchase")
            .insert("orderId", "order-1")
            .insert("amount", 4.99)
            .insert("currency", "USD")
            .with_device_info(&snapshot);

        assert_eq!(payload.event_name(), Some("Purchase"));
        assert_eq!(payload.get("amount"), Some(&Value::from(4.99)));
        assert_eq!(payload.get("device_type"), Some(&Value::from("phone")));
        assert!(payload.get("fb_attribution_id").is_none());
    }

    #[test]
    fn test_device_info_overrides_caller_fields() {
        let snapshot = DeviceSnapshot::collect(&MockPlatform::new());
        let payload = EventPayload::new("Install")
            .insert("app_version", "stale")
            .with_device_info(&snapshot);

        assert_eq!(payload.get("app_version"), Some(&Value::from("1.0.0")));
    }

    #[test]
    fn test_attribution_slots_merge() {
        let slots = AttributionSlots {
            adid: Some("adid-9".to_string()),
            attribution_adid: Some("adid-2".to_string()),
            campaign: Some("spring".to_string()),
            ..Default::default()
        };
        let payload = EventPayload::new("AdRevenue").with_attribution(&slots);

        assert_eq!(payload.get("adid"), Some(&Value::from("adid-9")));
        assert_eq!(
            payload.get("attribution_adid"),
            Some(&Value::from("adid-2"))
        );
        assert_eq!(
            payload.get("attribution_campaign"),
            Some(&Value::from("spring"))
        );
        assert!(payload.get("attribution_network").is_none());
    }

    #[test]
    fn test_device_id_sent_before_attribution_arrives() {
        let slots = AttributionSlots {
            adid: Some("adid-9".to_string()),
            ..Default::default()
        };
        let payload = EventPayload::new("FirstInstall").with_attribution(&slots);

        assert_eq!(payload.get("adid"), Some(&Value::from("adid-9")));
        assert!(payload.get("attribution_adid").is_none());
    }

    #[test]
    fn test_payload_json() {
        let payload = EventPayload::new("Login").insert("level", 3);
        let value: Value = serde_json::from_str(&payload.to_json()).unwrap();
        assert_eq!(value["event_name"], "Login");
        assert_eq!(value["level"], 3);
    }
}
