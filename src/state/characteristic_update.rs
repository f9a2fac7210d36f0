// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic updates pushed to the accessory framework.

use crate::types::{Active, RotationSpeed, SwingMode};

/// A new value for one of the three exposed characteristics.
///
/// Updates are derived from a [`FanStatus`](super::FanStatus) with
/// [`characteristic_updates`](super::FanStatus::characteristic_updates) and
/// dispatched to subscribers by the periodic poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicUpdate {
    /// Power changed.
    Active(Active),
    /// Rotation speed changed.
    RotationSpeed(RotationSpeed),
    /// Swing mode changed.
    SwingMode(SwingMode),
}

impl CharacteristicUpdate {
    /// Returns the characteristic name, as used in log output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Active(_) => "Active",
            Self::RotationSpeed(_) => "RotationSpeed",
            Self::SwingMode(_) => "SwingMode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(CharacteristicUpdate::Active(Active::Active).name(), "Active");
        assert_eq!(
            CharacteristicUpdate::RotationSpeed(RotationSpeed::MAX).name(),
            "RotationSpeed"
        );
        assert_eq!(
            CharacteristicUpdate::SwingMode(SwingMode::Enabled).name(),
            "SwingMode"
        );
    }
}
