// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power, intensity and oscillation commands.

use crate::command::{Command, INTENSITY_INSTANCE, OSCILLATION_INSTANCE};
use crate::types::FanIntensity;

/// Command to change one aspect of the fan.
///
/// # Examples
///
/// ```
/// use alexa_fan_lib::command::{Command, FanCommand};
///
/// let on = FanCommand::PowerToggle { is_on: true };
/// assert_eq!(on.action(), "turnOn");
/// assert_eq!(on.instance(), None);
///
/// let swing = FanCommand::OscillationToggle { is_oscillating: false };
/// assert_eq!(swing.action(), "turnOffToggle");
/// assert_eq!(swing.instance(), Some("2"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanCommand {
    /// Turn the fan on or off.
    PowerToggle {
        /// The desired power state.
        is_on: bool,
    },
    /// Select an intensity level.
    IntensityChange(FanIntensity),
    /// Start or stop oscillation.
    OscillationToggle {
        /// The desired oscillation state.
        is_oscillating: bool,
    },
}

impl FanCommand {
    /// Creates a command to turn the fan on.
    #[must_use]
    pub const fn on() -> Self {
        Self::PowerToggle { is_on: true }
    }

    /// Creates a command to turn the fan off.
    #[must_use]
    pub const fn off() -> Self {
        Self::PowerToggle { is_on: false }
    }
}

impl Command for FanCommand {
    fn action(&self) -> &'static str {
        match self {
            Self::PowerToggle { is_on: true } => "turnOn",
            Self::PowerToggle { is_on: false } => "turnOff",
            Self::IntensityChange(_) => "setModeValue",
            Self::OscillationToggle {
                is_oscillating: true,
            } => "turnOnToggle",
            Self::OscillationToggle {
                is_oscillating: false,
            } => "turnOffToggle",
        }
    }

    fn instance(&self) -> Option<&'static str> {
        match self {
            Self::PowerToggle { .. } => None,
            Self::IntensityChange(_) => Some(INTENSITY_INSTANCE),
            Self::OscillationToggle { .. } => Some(OSCILLATION_INSTANCE),
        }
    }

    fn mode(&self) -> Option<String> {
        match self {
            Self::IntensityChange(level) => Some(level.as_str().to_string()),
            Self::PowerToggle { .. } | Self::OscillationToggle { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_commands() {
        let on = FanCommand::on().to_wire_action();
        assert_eq!(on.action, "turnOn");
        assert_eq!(on.instance, None);
        assert_eq!(on.mode, None);

        let off = FanCommand::off().to_wire_action();
        assert_eq!(off.action, "turnOff");
        assert_eq!(off.instance, None);
    }

    #[test]
    fn intensity_commands_carry_level_as_mode() {
        for level in FanIntensity::ALL {
            let action = FanCommand::IntensityChange(level).to_wire_action();
            assert_eq!(action.action, "setModeValue");
            assert_eq!(action.instance.as_deref(), Some("1"));
            assert_eq!(action.mode, Some(level.code().to_string()));
        }
    }

    #[test]
    fn oscillation_commands() {
        let on = FanCommand::OscillationToggle {
            is_oscillating: true,
        }
        .to_wire_action();
        assert_eq!(on.action, "turnOnToggle");
        assert_eq!(on.instance.as_deref(), Some("2"));
        assert_eq!(on.mode, None);

        let off = FanCommand::OscillationToggle {
            is_oscillating: false,
        }
        .to_wire_action();
        assert_eq!(off.action, "turnOffToggle");
        assert_eq!(off.instance.as_deref(), Some("2"));
    }
}
