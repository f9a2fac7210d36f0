// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability state records.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;

/// Capability interface a state record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Namespace {
    /// `Alexa.EndpointHealth`: connectivity of the device.
    EndpointHealth,
    /// `Alexa.PowerController`: on/off.
    PowerController,
    /// `Alexa.ModeController`: discrete modes such as intensity.
    ModeController,
    /// `Alexa.ToggleController`: two-state toggles such as oscillation.
    ToggleController,
    /// Any namespace the bridge does not handle.
    Other(String),
}

impl Namespace {
    /// Returns the namespace as reported by the API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::EndpointHealth => "Alexa.EndpointHealth",
            Self::PowerController => "Alexa.PowerController",
            Self::ModeController => "Alexa.ModeController",
            Self::ToggleController => "Alexa.ToggleController",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Namespace {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Alexa.EndpointHealth" => Self::EndpointHealth,
            "Alexa.PowerController" => Self::PowerController,
            "Alexa.ModeController" => Self::ModeController,
            "Alexa.ToggleController" => Self::ToggleController,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported attribute of a device.
///
/// # Examples
///
/// ```
/// use alexa_fan_lib::response::{CapabilityState, Namespace};
///
/// let raw = serde_json::json!(
///     r#"{"namespace":"Alexa.ModeController","instance":"1","value":"2"}"#
/// );
/// let state = CapabilityState::decode(&raw).unwrap();
/// assert_eq!(state.namespace, Namespace::ModeController);
/// assert_eq!(state.instance.as_deref(), Some("1"));
/// assert_eq!(state.value_text().as_deref(), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CapabilityState {
    /// Capability interface.
    pub namespace: Namespace,
    /// Property name within the interface.
    #[serde(default)]
    pub name: Option<String>,
    /// Distinguishes several controls of the same interface.
    #[serde(default)]
    pub instance: Option<String>,
    /// Reported value: a string, a number or a nested object.
    #[serde(default)]
    pub value: Value,
}

impl CapabilityState {
    /// Decodes one raw entry of a device's `capabilityStates` list.
    ///
    /// Entries arrive either as JSON-encoded strings or as inline objects.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the entry is not a capability record.
    pub fn decode(raw: &Value) -> Result<Self, ParseError> {
        match raw {
            Value::String(encoded) => serde_json::from_str(encoded).map_err(ParseError::Json),
            other => Self::deserialize(other).map_err(ParseError::Json),
        }
    }

    /// Returns the value as text.
    ///
    /// Nested objects such as `{"value": "OK"}` are unwrapped.
    #[must_use]
    pub fn value_text(&self) -> Option<String> {
        value_text(&self.value)
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Object(map) => map.get("value").and_then(value_text),
        Value::Null | Value::Array(_) => None,
    }
}
