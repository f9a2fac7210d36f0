// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized fan status snapshot.

use serde::{Deserialize, Serialize};

use crate::state::CharacteristicUpdate;
use crate::types::{Active, FanIntensity, RotationSpeed, ShutdownTimer, SwingMode};

/// Snapshot of the fan as reported by one status query.
///
/// Every field is optional: `None` means the query did not report the value,
/// not that it is `false`. A snapshot is never patched after it is produced;
/// the next query yields a complete replacement.
///
/// # Examples
///
/// ```
/// use alexa_fan_lib::state::FanStatus;
/// use alexa_fan_lib::types::FanIntensity;
///
/// let status = FanStatus::new()
///     .with_on(true)
///     .with_intensity(FanIntensity::Medium);
///
/// assert_eq!(status.is_on(), Some(true));
/// assert_eq!(status.rotation_speed().map(|s| s.value()), Some(50));
/// assert_eq!(status.is_oscillating(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) connected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) is_on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) fan_intensity: Option<FanIntensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) is_oscillating: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) shutdown_timer: Option<ShutdownTimer>,
}

impl FanStatus {
    /// Creates an empty snapshot with every field unknown.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connected: None,
            is_on: None,
            fan_intensity: None,
            is_oscillating: None,
            shutdown_timer: None,
        }
    }

    /// Snapshot used in place of a failed query: disconnected, nothing else known.
    #[must_use]
    pub const fn disconnected() -> Self {
        Self {
            connected: Some(false),
            ..Self::new()
        }
    }

    /// Sets the connectivity flag.
    #[must_use]
    pub const fn with_connected(mut self, connected: bool) -> Self {
        self.connected = Some(connected);
        self
    }

    /// Sets the power flag.
    #[must_use]
    pub const fn with_on(mut self, is_on: bool) -> Self {
        self.is_on = Some(is_on);
        self
    }

    /// Sets the intensity level.
    #[must_use]
    pub const fn with_intensity(mut self, level: FanIntensity) -> Self {
        self.fan_intensity = Some(level);
        self
    }

    /// Sets the oscillation flag.
    #[must_use]
    pub const fn with_oscillating(mut self, is_oscillating: bool) -> Self {
        self.is_oscillating = Some(is_oscillating);
        self
    }

    /// Sets the shutdown timer.
    #[must_use]
    pub const fn with_shutdown_timer(mut self, timer: ShutdownTimer) -> Self {
        self.shutdown_timer = Some(timer);
        self
    }

    /// Returns whether the cloud reports the device as reachable.
    #[must_use]
    pub const fn connected(&self) -> Option<bool> {
        self.connected
    }

    /// Returns whether the fan is on.
    #[must_use]
    pub const fn is_on(&self) -> Option<bool> {
        self.is_on
    }

    /// Returns the intensity level.
    #[must_use]
    pub const fn fan_intensity(&self) -> Option<FanIntensity> {
        self.fan_intensity
    }

    /// Returns whether the fan oscillates.
    #[must_use]
    pub const fn is_oscillating(&self) -> Option<bool> {
        self.is_oscillating
    }

    /// Returns the shutdown timer.
    #[must_use]
    pub const fn shutdown_timer(&self) -> Option<ShutdownTimer> {
        self.shutdown_timer
    }

    /// Returns the power characteristic value.
    #[must_use]
    pub fn active(&self) -> Option<Active> {
        self.is_on.map(Active::from)
    }

    /// Returns the rotation speed characteristic value.
    #[must_use]
    pub fn rotation_speed(&self) -> Option<RotationSpeed> {
        self.fan_intensity.map(RotationSpeed::from)
    }

    /// Returns the swing mode characteristic value.
    #[must_use]
    pub fn swing_mode(&self) -> Option<SwingMode> {
        self.is_oscillating.map(SwingMode::from)
    }

    /// Returns `true` if power, intensity or oscillation differ.
    ///
    /// Connectivity and the shutdown timer are not exposed as
    /// characteristics and are ignored.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.is_on != other.is_on
            || self.fan_intensity != other.fan_intensity
            || self.is_oscillating != other.is_oscillating
    }

    /// Returns one characteristic update per field this snapshot reports.
    ///
    /// Unknown fields produce no update, so observers keep their last value.
    #[must_use]
    pub fn characteristic_updates(&self) -> Vec<CharacteristicUpdate> {
        let mut updates = Vec::with_capacity(3);
        if let Some(active) = self.active() {
            updates.push(CharacteristicUpdate::Active(active));
        }
        if let Some(speed) = self.rotation_speed() {
            updates.push(CharacteristicUpdate::RotationSpeed(speed));
        }
        if let Some(swing) = self.swing_mode() {
            updates.push(CharacteristicUpdate::SwingMode(swing));
        }
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_status_is_unknown() {
        let status = FanStatus::new();
        assert_eq!(status.connected(), None);
        assert_eq!(status.is_on(), None);
        assert_eq!(status.fan_intensity(), None);
        assert_eq!(status.is_oscillating(), None);
        assert_eq!(status.shutdown_timer(), None);
    }

    #[test]
    fn disconnected_only_sets_connectivity() {
        let status = FanStatus::disconnected();
        assert_eq!(status.connected(), Some(false));
        assert_eq!(status.is_on(), None);
        assert!(status.characteristic_updates().is_empty());
    }

    #[test]
    fn differs_from_compares_exposed_fields() {
        let base = FanStatus::new().with_on(true).with_intensity(FanIntensity::Low);

        assert!(!base.differs_from(&base.clone()));
        assert!(base.differs_from(&base.clone().with_on(false)));
        assert!(base.differs_from(&base.clone().with_intensity(FanIntensity::Max)));
        assert!(base.differs_from(&base.clone().with_oscillating(true)));
    }

    #[test]
    fn differs_from_ignores_connectivity_and_timer() {
        let base = FanStatus::new().with_on(true);
        let other = base
            .clone()
            .with_connected(true)
            .with_shutdown_timer(ShutdownTimer::new(2).unwrap());
        assert!(!base.differs_from(&other));
    }

    #[test]
    fn absent_field_differs_from_present_field() {
        assert!(FanStatus::disconnected().differs_from(&FanStatus::new().with_on(false)));
    }

    #[test]
    fn characteristic_updates_only_for_present_fields() {
        let status = FanStatus::new()
            .with_on(true)
            .with_oscillating(false);

        assert_eq!(
            status.characteristic_updates(),
            vec![
                CharacteristicUpdate::Active(Active::Active),
                CharacteristicUpdate::SwingMode(SwingMode::Disabled),
            ]
        );
    }

    #[test]
    fn serializes_present_fields_only() {
        let status = FanStatus::new()
            .with_connected(true)
            .with_intensity(FanIntensity::High);
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({ "connected": true, "fanIntensity": 2 })
        );
    }
}
