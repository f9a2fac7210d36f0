// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-state characteristic values for power and swing mode.

use std::fmt;

use crate::error::ValueError;

/// Power characteristic of the fan service.
///
/// # Examples
///
/// ```
/// use alexa_fan_lib::types::Active;
///
/// assert_eq!(Active::from(true), Active::Active);
/// assert_eq!(Active::Inactive.value(), 0);
/// assert_eq!(Active::try_from(1).unwrap(), Active::Active);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Active {
    /// The fan is off.
    #[default]
    Inactive,
    /// The fan is running.
    Active,
}

impl Active {
    /// Returns the numeric characteristic value (0 or 1).
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Inactive => 0,
            Self::Active => 1,
        }
    }

    /// Returns `true` if the fan is running.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<bool> for Active {
    fn from(value: bool) -> Self {
        if value { Self::Active } else { Self::Inactive }
    }
}

impl TryFrom<u8> for Active {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Active),
            other => Err(ValueError::OutOfRange {
                min: 0,
                max: 1,
                actual: u16::from(other),
            }),
        }
    }
}

impl fmt::Display for Active {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inactive => f.write_str("inactive"),
            Self::Active => f.write_str("active"),
        }
    }
}

/// Swing mode characteristic, i.e. whether the fan oscillates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwingMode {
    /// Oscillation is off.
    #[default]
    Disabled,
    /// Oscillation is on.
    Enabled,
}

impl SwingMode {
    /// Returns the numeric characteristic value (0 or 1).
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::Enabled => 1,
        }
    }

    /// Returns `true` if the fan oscillates.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for SwingMode {
    fn from(value: bool) -> Self {
        if value { Self::Enabled } else { Self::Disabled }
    }
}

impl TryFrom<u8> for SwingMode {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::Enabled),
            other => Err(ValueError::OutOfRange {
                min: 0,
                max: 1,
                actual: u16::from(other),
            }),
        }
    }
}

impl fmt::Display for SwingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("disabled"),
            Self::Enabled => f.write_str("enabled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_values() {
        assert_eq!(Active::Active.value(), 1);
        assert!(Active::from(true).is_active());
        assert!(!Active::default().is_active());
        assert!(Active::try_from(2).is_err());
    }

    #[test]
    fn swing_mode_values() {
        assert_eq!(SwingMode::Enabled.value(), 1);
        assert_eq!(SwingMode::try_from(0).unwrap(), SwingMode::Disabled);
        assert!(SwingMode::from(true).is_enabled());
        assert!(SwingMode::try_from(3).is_err());
    }
}
