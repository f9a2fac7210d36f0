// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan command definitions.
//!
//! This module provides typed representations of the operations the bridge
//! sends to the cloud API, and their serialization to the API's
//! action/instance/mode vocabulary.
//!
//! # Wire Vocabulary
//!
//! | Command | action | instance | mode |
//! |---------|--------|----------|------|
//! | Power on | `turnOn` | - | - |
//! | Power off | `turnOff` | - | - |
//! | Intensity N (0-3) | `setModeValue` | `"1"` | `N` |
//! | Oscillation on | `turnOnToggle` | `"2"` | - |
//! | Oscillation off | `turnOffToggle` | `"2"` | - |
//!
//! # Examples
//!
//! ```
//! use alexa_fan_lib::command::{Command, FanCommand};
//! use alexa_fan_lib::types::FanIntensity;
//!
//! let cmd = FanCommand::IntensityChange(FanIntensity::High);
//! assert_eq!(cmd.action(), "setModeValue");
//! assert_eq!(cmd.instance(), Some("1"));
//! assert_eq!(cmd.mode(), Some("2".to_string()));
//! ```

mod fan;

pub use fan::FanCommand;

use serde::{Deserialize, Serialize};

/// Instance identifier of the intensity `ModeController`.
pub const INTENSITY_INSTANCE: &str = "1";

/// Instance identifier of the oscillation `ToggleController`.
pub const OSCILLATION_INSTANCE: &str = "2";

/// Instance identifier of the shutdown timer `ModeController`.
pub const SHUTDOWN_TIMER_INSTANCE: &str = "3";

/// A command that can be executed against a device.
///
/// Commands are serialized to a [`WireAction`] for transmission.
pub trait Command {
    /// Returns the API action name, e.g. `"turnOn"`.
    fn action(&self) -> &'static str;

    /// Returns the capability instance the action targets, if any.
    fn instance(&self) -> Option<&'static str> {
        None
    }

    /// Returns the mode value sent with the action, if any.
    fn mode(&self) -> Option<String> {
        None
    }

    /// Returns the serialized form sent as the control request parameters.
    fn to_wire_action(&self) -> WireAction {
        WireAction {
            action: self.action().to_string(),
            instance: self.instance().map(str::to_string),
            mode: self.mode(),
        }
    }
}

/// The `{action, instance?, mode?}` triple the cloud API expects.
///
/// Absent fields are omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAction {
    /// Action name.
    pub action: String,
    /// Capability instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Mode value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FanIntensity;

    #[test]
    fn wire_action_omits_absent_fields() {
        let action = FanCommand::PowerToggle { is_on: true }.to_wire_action();
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            serde_json::json!({ "action": "turnOn" })
        );
    }

    #[test]
    fn wire_action_includes_instance_and_mode() {
        let action = FanCommand::IntensityChange(FanIntensity::Max).to_wire_action();
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            serde_json::json!({ "action": "setModeValue", "instance": "1", "mode": "3" })
        );
    }
}
