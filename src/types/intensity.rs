// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discrete fan intensity levels.
//!
//! The fan exposes four hardware levels through the `ModeController`
//! capability (instance `"1"`). The accessory framework works with a
//! rotation-speed percentage instead, so this module also owns the fixed
//! quantization table between the two.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::types::RotationSpeed;

/// One of the four hardware intensity levels.
///
/// | Level | Code | Percentage |
/// |-------|------|------------|
/// | `Low` | `0` | 25 |
/// | `Medium` | `1` | 50 |
/// | `High` | `2` | 75 |
/// | `Max` | `3` | 100 |
///
/// # Examples
///
/// ```
/// use alexa_fan_lib::types::FanIntensity;
///
/// let level: FanIntensity = "2".parse().unwrap();
/// assert_eq!(level, FanIntensity::High);
/// assert_eq!(level.percentage(), 75);
///
/// assert_eq!(FanIntensity::from_percentage(26), Some(FanIntensity::Medium));
/// assert_eq!(FanIntensity::from_percentage(0), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum FanIntensity {
    /// Level `0`.
    Low,
    /// Level `1`.
    Medium,
    /// Level `2`.
    High,
    /// Level `3`.
    Max,
}

impl FanIntensity {
    /// All levels in ascending order.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Max];

    /// Percentage span covered by a single level.
    pub const STEP: u8 = 25;

    /// Creates a level from its numeric code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnsupportedIntensity` for codes above 3.
    pub fn from_code(code: u8) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            3 => Ok(Self::Max),
            other => Err(ValueError::UnsupportedIntensity(other.to_string())),
        }
    }

    /// Returns the numeric code used by the cloud API.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Max => 3,
        }
    }

    /// Returns the code in the string form the cloud API expects as `mode`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "0",
            Self::Medium => "1",
            Self::High => "2",
            Self::Max => "3",
        }
    }

    /// Returns the rotation-speed percentage this level is shown as.
    #[must_use]
    pub const fn percentage(self) -> u8 {
        (self.code() + 1) * Self::STEP
    }

    /// Maps a percentage back onto a level.
    ///
    /// `0` means "off" and has no level. Any other value selects
    /// `floor((percentage - 1) / 25)`, clamped to the highest level, so
    /// 1-25 is `Low`, 26-50 `Medium`, 51-75 `High` and 76 and above `Max`.
    #[must_use]
    pub const fn from_percentage(percentage: u8) -> Option<Self> {
        match percentage {
            0 => None,
            1..=25 => Some(Self::Low),
            26..=50 => Some(Self::Medium),
            51..=75 => Some(Self::High),
            _ => Some(Self::Max),
        }
    }
}

impl fmt::Display for FanIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanIntensity {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(|code| Self::from_code(code).ok())
            .ok_or_else(|| ValueError::UnsupportedIntensity(s.to_string()))
    }
}

impl TryFrom<u8> for FanIntensity {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_code(value)
    }
}

impl From<FanIntensity> for u8 {
    fn from(value: FanIntensity) -> Self {
        value.code()
    }
}

impl From<FanIntensity> for RotationSpeed {
    fn from(value: FanIntensity) -> Self {
        RotationSpeed::clamped(value.percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_table() {
        let table: Vec<u8> = FanIntensity::ALL.iter().map(|l| l.percentage()).collect();
        assert_eq!(table, vec![25, 50, 75, 100]);
    }

    #[test]
    fn from_percentage_boundaries() {
        assert_eq!(FanIntensity::from_percentage(0), None);
        assert_eq!(FanIntensity::from_percentage(1), Some(FanIntensity::Low));
        assert_eq!(FanIntensity::from_percentage(25), Some(FanIntensity::Low));
        assert_eq!(FanIntensity::from_percentage(26), Some(FanIntensity::Medium));
        assert_eq!(FanIntensity::from_percentage(50), Some(FanIntensity::Medium));
        assert_eq!(FanIntensity::from_percentage(51), Some(FanIntensity::High));
        assert_eq!(FanIntensity::from_percentage(75), Some(FanIntensity::High));
        assert_eq!(FanIntensity::from_percentage(76), Some(FanIntensity::Max));
        assert_eq!(FanIntensity::from_percentage(100), Some(FanIntensity::Max));
        assert_eq!(FanIntensity::from_percentage(255), Some(FanIntensity::Max));
    }

    #[test]
    fn from_percentage_matches_formula() {
        for p in 1..=100u8 {
            let expected = ((p - 1) / 25).min(3);
            assert_eq!(
                FanIntensity::from_percentage(p).map(FanIntensity::code),
                Some(expected),
                "percentage {p}"
            );
        }
    }

    #[test]
    fn percentage_maps_back_to_same_level() {
        for level in FanIntensity::ALL {
            assert_eq!(FanIntensity::from_percentage(level.percentage()), Some(level));
        }
    }

    #[test]
    fn parse_codes() {
        assert_eq!("0".parse::<FanIntensity>().unwrap(), FanIntensity::Low);
        assert_eq!("3".parse::<FanIntensity>().unwrap(), FanIntensity::Max);
        assert_eq!(
            "9".parse::<FanIntensity>(),
            Err(ValueError::UnsupportedIntensity("9".to_string()))
        );
        assert!("high".parse::<FanIntensity>().is_err());
        assert!("".parse::<FanIntensity>().is_err());
    }

    #[test]
    fn serde_uses_numeric_code() {
        assert_eq!(serde_json::to_string(&FanIntensity::High).unwrap(), "2");
        let level: FanIntensity = serde_json::from_str("1").unwrap();
        assert_eq!(level, FanIntensity::Medium);
        assert!(serde_json::from_str::<FanIntensity>("4").is_err());
    }
}
