// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state query results.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a device state query.
///
/// The API answers with one state bundle per requested device plus a list of
/// request-level errors:
///
/// ```json
/// {
///   "deviceStates": [
///     {
///       "entity": { "entityId": "fan-1", "entityType": "APPLIANCE" },
///       "capabilityStates": [
///         "{\"namespace\":\"Alexa.PowerController\",\"value\":\"ON\"}"
///       ]
///     }
///   ],
///   "errors": []
/// }
/// ```
///
/// # Examples
///
/// ```
/// use alexa_fan_lib::response::DeviceQueryResult;
///
/// let json = r#"{"deviceStates":[{"capabilityStates":[]}],"errors":[]}"#;
/// let result: DeviceQueryResult = serde_json::from_str(json).unwrap();
/// assert_eq!(result.device_states.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceQueryResult {
    /// Per-device state bundles. The first one is the device of interest.
    #[serde(default)]
    pub device_states: Vec<DeviceStateBundle>,
    /// Request-level errors.
    #[serde(default)]
    pub errors: Vec<QueryError>,
}

impl DeviceQueryResult {
    /// Creates a result holding a single device with the given raw
    /// capability entries.
    #[must_use]
    pub fn single(capability_states: Vec<Value>) -> Self {
        Self {
            device_states: vec![DeviceStateBundle {
                entity: None,
                capability_states,
                error: None,
            }],
            errors: Vec::new(),
        }
    }
}

/// Reported state of a single device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStateBundle {
    /// The device this bundle describes.
    #[serde(default)]
    pub entity: Option<Entity>,
    /// Raw capability entries, either JSON-encoded strings or inline objects.
    #[serde(default)]
    pub capability_states: Vec<Value>,
    /// Error reported for this device, if any.
    #[serde(default)]
    pub error: Option<QueryError>,
}

/// Identifies a device in requests and responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Device identifier.
    pub entity_id: String,
    /// Entity kind, `APPLIANCE` for devices.
    #[serde(default)]
    pub entity_type: Option<String>,
}

impl Entity {
    /// Creates an appliance entity for a device id.
    #[must_use]
    pub fn appliance(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type: Some("APPLIANCE".to_string()),
        }
    }
}

/// Error entry reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryError {
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub message: Option<String>,
    /// Device the error refers to.
    #[serde(default)]
    pub entity: Option<Entity>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code.as_deref().unwrap_or("UNKNOWN");
        match &self.message {
            Some(message) => write!(f, "{code}: {message}"),
            None => f.write_str(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_query_result() {
        let json = r#"{
            "deviceStates": [{
                "entity": { "entityId": "fan-1", "entityType": "APPLIANCE" },
                "capabilityStates": [
                    "{\"namespace\":\"Alexa.PowerController\",\"value\":\"ON\"}",
                    { "namespace": "Alexa.EndpointHealth", "value": { "value": "OK" } }
                ],
                "error": null
            }],
            "errors": [{ "code": "THROTTLED", "message": "slow down" }]
        }"#;
        let result: DeviceQueryResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.device_states.len(), 1);
        let bundle = &result.device_states[0];
        assert_eq!(bundle.entity, Some(Entity::appliance("fan-1")));
        assert_eq!(bundle.capability_states.len(), 2);
        assert!(bundle.error.is_none());
        assert_eq!(result.errors[0].to_string(), "THROTTLED: slow down");
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let result: DeviceQueryResult = serde_json::from_str("{}").unwrap();
        assert!(result.device_states.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn query_error_display_without_message() {
        let err = QueryError {
            code: Some("ENDPOINT_UNREACHABLE".to_string()),
            ..QueryError::default()
        };
        assert_eq!(err.to_string(), "ENDPOINT_UNREACHABLE");
    }
}
