// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser turning device query results into [`FanStatus`] snapshots.

use crate::command::{INTENSITY_INSTANCE, OSCILLATION_INSTANCE, SHUTDOWN_TIMER_INSTANCE};
use crate::error::ParseError;
use crate::response::{CapabilityState, DeviceQueryResult, Namespace};
use crate::state::FanStatus;
use crate::types::{FanIntensity, ShutdownTimer};

/// Parses a device query result into a status snapshot.
///
/// Only the first device entry is considered. Request-level and per-device
/// errors are logged but do not stop parsing. Each capability entry is
/// decoded on its own; malformed or unrecognized entries are skipped with a
/// warning and never set a field.
///
/// # Errors
///
/// - `ParseError::NoDeviceState` if the result holds no device entry.
/// - `ParseError::UnsupportedIntensity` if the intensity capability reports a
///   level outside `0..=3`. Unlike the shutdown timer, an unknown intensity
///   fails the whole parse.
///
/// # Examples
///
/// ```
/// use alexa_fan_lib::response::DeviceQueryResult;
/// use alexa_fan_lib::state::parse_query_result;
/// use serde_json::json;
///
/// let result = DeviceQueryResult::single(vec![
///     json!({ "namespace": "Alexa.PowerController", "value": "ON" }),
///     json!({ "namespace": "Alexa.ToggleController", "instance": "2", "value": "OFF" }),
/// ]);
///
/// let status = parse_query_result(&result).unwrap();
/// assert_eq!(status.is_on(), Some(true));
/// assert_eq!(status.is_oscillating(), Some(false));
/// ```
pub fn parse_query_result(result: &DeviceQueryResult) -> Result<FanStatus, ParseError> {
    for error in &result.errors {
        tracing::warn!(error = %error, "Device query reported an error");
    }

    let device = result
        .device_states
        .first()
        .ok_or(ParseError::NoDeviceState)?;

    if let Some(error) = &device.error {
        tracing::warn!(error = %error, "Device state carries an error");
    }

    let mut status = FanStatus::new();
    for raw in &device.capability_states {
        match CapabilityState::decode(raw) {
            Ok(capability) => apply_capability(&mut status, &capability)?,
            Err(e) => {
                tracing::warn!(error = %e, entry = %raw, "Skipping undecodable capability state");
            }
        }
    }

    tracing::trace!(status = ?status, "Parsed fan status");
    Ok(status)
}

fn apply_capability(status: &mut FanStatus, capability: &CapabilityState) -> Result<(), ParseError> {
    let instance = capability.instance.as_deref();
    let value = capability.value_text();

    match (&capability.namespace, instance) {
        (Namespace::EndpointHealth, _) => {
            if let Some(value) = value {
                status.connected = Some(value == "OK");
            }
        }
        (Namespace::PowerController, _) => {
            if let Some(value) = value {
                status.is_on = Some(value == "ON");
            }
        }
        (Namespace::ModeController, Some(INTENSITY_INSTANCE)) => {
            let value = value.unwrap_or_default();
            let level = value
                .parse::<FanIntensity>()
                .map_err(|_| ParseError::UnsupportedIntensity(value))?;
            status.fan_intensity = Some(level);
        }
        (Namespace::ModeController, Some(SHUTDOWN_TIMER_INSTANCE)) => {
            match value.unwrap_or_default().parse::<ShutdownTimer>() {
                Ok(timer) => status.shutdown_timer = Some(timer),
                Err(e) => tracing::warn!(error = %e, "Skipping shutdown timer state"),
            }
        }
        (Namespace::ToggleController, Some(OSCILLATION_INSTANCE)) => {
            if let Some(value) = value {
                status.is_oscillating = Some(value == "ON");
            }
        }
        (namespace, instance) => {
            tracing::warn!(
                namespace = %namespace,
                instance = instance.unwrap_or("-"),
                "Skipping unsupported capability state"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use crate::response::{DeviceStateBundle, QueryError};
    use serde_json::{Value, json};

    fn parse(entries: Vec<Value>) -> Result<FanStatus, ParseError> {
        parse_query_result(&DeviceQueryResult::single(entries))
    }

    #[test]
    fn power_on() {
        let status = parse(vec![json!({ "namespace": "Alexa.PowerController", "value": "ON" })]).unwrap();
        assert_eq!(status.is_on(), Some(true));
    }

    #[test]
    fn power_off() {
        let status =
            parse(vec![json!({ "namespace": "Alexa.PowerController", "value": "OFF" })]).unwrap();
        assert_eq!(status.is_on(), Some(false));
    }

    #[test]
    fn power_without_value_is_unknown() {
        let status = parse(vec![json!({ "namespace": "Alexa.PowerController" })]).unwrap();
        assert_eq!(status.is_on(), None);
    }

    #[test]
    fn endpoint_health() {
        let ok = parse(vec![
            json!({ "namespace": "Alexa.EndpointHealth", "value": { "value": "OK" } }),
        ])
        .unwrap();
        assert_eq!(ok.connected(), Some(true));

        let unreachable = parse(vec![
            json!({ "namespace": "Alexa.EndpointHealth", "value": { "value": "UNREACHABLE" } }),
        ])
        .unwrap();
        assert_eq!(unreachable.connected(), Some(false));
    }

    #[test]
    fn health_without_value_is_unknown() {
        let status = parse(vec![json!({ "namespace": "Alexa.EndpointHealth" })]).unwrap();
        assert_eq!(status.connected(), None);
    }

    #[test]
    fn oscillation_without_value_is_unknown() {
        let status = parse(vec![
            json!({ "namespace": "Alexa.ToggleController", "instance": "2" }),
            json!({ "namespace": "Alexa.EndpointHealth" }),
        ])
        .unwrap();
        assert_eq!(status.is_oscillating(), None);
        assert_eq!(status.connected(), None);
        assert!(status.characteristic_updates().is_empty());
    }

    #[test]
    fn intensity_maps_to_percentage() {
        let status = parse(vec![
            json!({ "namespace": "Alexa.ModeController", "instance": "1", "value": "2" }),
        ])
        .unwrap();
        assert_eq!(status.fan_intensity(), Some(FanIntensity::High));
        assert_eq!(status.rotation_speed().map(|s| s.value()), Some(75));
    }

    #[test]
    fn unsupported_intensity_fails_parse() {
        let err = parse(vec![
            json!({ "namespace": "Alexa.PowerController", "value": "ON" }),
            json!({ "namespace": "Alexa.ModeController", "instance": "1", "value": "9" }),
        ])
        .unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedIntensity(ref v) if v == "9"));
    }

    #[test]
    fn missing_intensity_value_fails_parse() {
        let err = parse(vec![json!({ "namespace": "Alexa.ModeController", "instance": "1" })])
            .unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedIntensity(_)));
    }

    #[test]
    fn shutdown_timer() {
        let status = parse(vec![
            json!({ "namespace": "Alexa.ModeController", "instance": "3", "value": "4" }),
        ])
        .unwrap();
        assert_eq!(status.shutdown_timer(), ShutdownTimer::new(4).ok());
    }

    #[test]
    fn unsupported_shutdown_timer_is_skipped() {
        let status = parse(vec![
            json!({ "namespace": "Alexa.ModeController", "instance": "3", "value": "5" }),
            json!({ "namespace": "Alexa.PowerController", "value": "ON" }),
        ])
        .unwrap();
        assert_eq!(status.shutdown_timer(), None);
        assert_eq!(status.is_on(), Some(true));
        assert_eq!(
            "5".parse::<ShutdownTimer>(),
            Err(ValueError::UnsupportedShutdownTimer("5".to_string()))
        );
    }

    #[test]
    fn oscillation() {
        let status = parse(vec![
            json!({ "namespace": "Alexa.ToggleController", "instance": "2", "value": "OFF" }),
        ])
        .unwrap();
        assert_eq!(status.is_oscillating(), Some(false));

        let status = parse(vec![
            json!({ "namespace": "Alexa.ToggleController", "instance": "2", "value": "ON" }),
        ])
        .unwrap();
        assert_eq!(status.is_oscillating(), Some(true));
    }

    #[test]
    fn unknown_instances_and_namespaces_are_skipped() {
        let status = parse(vec![
            json!({ "namespace": "Alexa.ModeController", "instance": "7", "value": "1" }),
            json!({ "namespace": "Alexa.ToggleController", "instance": "5", "value": "ON" }),
            json!({ "namespace": "Alexa.RangeController", "instance": "1", "value": 3 }),
        ])
        .unwrap();
        assert_eq!(status, FanStatus::new());
    }

    #[test]
    fn malformed_entry_does_not_abort_parse() {
        let status = parse(vec![
            json!("{not json"),
            json!({ "value": "ON" }),
            json!(r#"{"namespace":"Alexa.PowerController","value":"ON"}"#),
        ])
        .unwrap();
        assert_eq!(status.is_on(), Some(true));
    }

    #[test]
    fn full_snapshot() {
        let status = parse(vec![
            json!(r#"{"namespace":"Alexa.EndpointHealth","name":"connectivity","value":{"value":"OK"}}"#),
            json!(r#"{"namespace":"Alexa.PowerController","name":"powerState","value":"ON"}"#),
            json!(r#"{"namespace":"Alexa.ModeController","instance":"1","value":"0"}"#),
            json!(r#"{"namespace":"Alexa.ModeController","instance":"3","value":"0"}"#),
            json!(r#"{"namespace":"Alexa.ToggleController","instance":"2","value":"ON"}"#),
        ])
        .unwrap();

        assert_eq!(
            status,
            FanStatus::new()
                .with_connected(true)
                .with_on(true)
                .with_intensity(FanIntensity::Low)
                .with_shutdown_timer(ShutdownTimer::OFF)
                .with_oscillating(true)
        );
    }

    #[test]
    fn empty_device_list_fails() {
        let err = parse_query_result(&DeviceQueryResult::default()).unwrap_err();
        assert!(matches!(err, ParseError::NoDeviceState));
    }

    #[test]
    fn errors_are_not_fatal() {
        let result = DeviceQueryResult {
            device_states: vec![
                DeviceStateBundle {
                    entity: None,
                    capability_states: vec![
                        json!({ "namespace": "Alexa.PowerController", "value": "OFF" }),
                    ],
                    error: Some(QueryError {
                        code: Some("STALE".to_string()),
                        ..QueryError::default()
                    }),
                },
                DeviceStateBundle {
                    entity: None,
                    capability_states: vec![
                        json!({ "namespace": "Alexa.PowerController", "value": "ON" }),
                    ],
                    error: None,
                },
            ],
            errors: vec![QueryError::default()],
        };

        let status = parse_query_result(&result).unwrap();
        assert_eq!(status.is_on(), Some(false));
    }
}
