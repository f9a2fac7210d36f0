// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for accessories that push characteristic updates.

use crate::state::FanStatus;
use crate::subscription::SubscriptionId;
use crate::types::{Active, RotationSpeed, SwingMode};

/// Trait for types that push characteristic updates to observers.
///
/// Updates are only produced while periodic polling runs, and only for
/// fields the latest snapshot reports.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use alexa_fan_lib::accessory::FanAccessory;
/// use alexa_fan_lib::config::{ApiConfig, FanConfig};
/// use alexa_fan_lib::subscription::Subscribable;
///
/// # async fn example() -> alexa_fan_lib::Result<()> {
/// let client = Arc::new(ApiConfig::new("session-id=...").into_client()?);
/// let fan = FanAccessory::new(client, FanConfig::new("Fan", "fan-1"));
///
/// let sub_id = fan.on_rotation_speed_changed(|speed| {
///     println!("Rotation speed is now {speed}");
/// });
///
/// fan.unsubscribe(sub_id);
/// # Ok(())
/// # }
/// ```
pub trait Subscribable {
    /// Subscribes to power changes.
    fn on_active_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Active) + Send + Sync + 'static;

    /// Subscribes to rotation speed changes.
    fn on_rotation_speed_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(RotationSpeed) + Send + Sync + 'static;

    /// Subscribes to swing mode changes.
    fn on_swing_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(SwingMode) + Send + Sync + 'static;

    /// Subscribes to changed snapshots.
    ///
    /// Useful for logging or for reacting to connectivity loss, which has no
    /// characteristic of its own.
    fn on_status_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FanStatus) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
