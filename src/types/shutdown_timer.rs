// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shutdown timer setting reported by the fan.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Shutdown timer code (0-4) reported through `ModeController` instance `"3"`.
///
/// The fan only reports this value; it is never set through the bridge.
///
/// # Examples
///
/// ```
/// use alexa_fan_lib::types::ShutdownTimer;
///
/// let timer: ShutdownTimer = "4".parse().unwrap();
/// assert_eq!(timer.value(), 4);
/// assert!(ShutdownTimer::new(5).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub struct ShutdownTimer(u8);

impl ShutdownTimer {
    /// Highest code the fan reports.
    pub const MAX: u8 = 4;

    /// Timer disabled.
    pub const OFF: Self = Self(0);

    /// Creates a timer value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnsupportedShutdownTimer` if value exceeds 4.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::UnsupportedShutdownTimer(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the timer code.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` if a shutdown is scheduled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ShutdownTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShutdownTimer {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(|code| Self::new(code).ok())
            .ok_or_else(|| ValueError::UnsupportedShutdownTimer(s.to_string()))
    }
}

impl TryFrom<u8> for ShutdownTimer {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShutdownTimer> for u8 {
    fn from(value: ShutdownTimer) -> Self {
        value.0
    }
}
