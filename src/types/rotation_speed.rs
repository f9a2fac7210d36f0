// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rotation speed percentage exposed to the accessory framework.

use std::fmt;

use crate::error::ValueError;
use crate::types::FanIntensity;

/// Rotation speed as a percentage (0-100).
///
/// The framework presents the fan in steps of 25. A value of 0 means the fan
/// is off rather than running at its lowest level.
///
/// # Examples
///
/// ```
/// use alexa_fan_lib::types::{FanIntensity, RotationSpeed};
///
/// let speed = RotationSpeed::new(60).unwrap();
/// assert_eq!(speed.intensity(), Some(FanIntensity::High));
///
/// assert!(RotationSpeed::OFF.is_off());
/// assert!(RotationSpeed::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RotationSpeed(u8);

impl RotationSpeed {
    /// Fan off (0%).
    pub const OFF: Self = Self(0);

    /// Full speed (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new rotation speed.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a rotation speed, clamping values above 100.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` for the 0% "off" speed.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        self.0 == 0
    }

    /// Returns the intensity level this speed selects, or `None` when off.
    #[must_use]
    pub const fn intensity(&self) -> Option<FanIntensity> {
        FanIntensity::from_percentage(self.0)
    }
}

impl fmt::Display for RotationSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for RotationSpeed {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
