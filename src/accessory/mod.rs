// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory adapter exposing the fan as three characteristics.
//!
//! | Characteristic | Get | Set |
//! |---|---|---|
//! | `Active` | `isOn` | `turnOn` / `turnOff` |
//! | `RotationSpeed` | `fanIntensity` as 25/50/75/100 % | `setModeValue`, or `turnOff` for 0 % |
//! | `SwingMode` | `isOscillating` | `turnOnToggle` / `turnOffToggle` |
//!
//! Every failure of a get or set reaches the caller as
//! [`AccessoryError::ServiceCommunicationFailure`]; nothing is absorbed at
//! this layer. Reads go through the [`StatusCache`], writes are sent one by
//! one without deduplication.

mod poller;

pub use poller::PollingHandle;

use std::fmt;
use std::slice;
use std::sync::Arc;

use crate::command::{Command, FanCommand};
use crate::config::FanConfig;
use crate::error::{AccessoryError, Error};
use crate::protocol::Protocol;
use crate::state::FanStatus;
use crate::status_cache::StatusCache;
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::{Active, RotationSpeed, SwingMode};

/// An oscillating fan bridged to the accessory framework.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use alexa_fan_lib::accessory::FanAccessory;
/// use alexa_fan_lib::config::{ApiConfig, FanConfig};
/// use alexa_fan_lib::types::{RotationSpeed, SwingMode};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Arc::new(ApiConfig::new("session-id=...").into_client()?);
/// let fan = FanAccessory::new(Arc::clone(&client), FanConfig::new("Fan", "fan-1"));
///
/// tokio::spawn(async move { client.initialize().await });
///
/// // Waits for the session handshake, then queries the fan.
/// println!("Speed: {}", fan.get_rotation_speed().await?);
///
/// fan.set_rotation_speed(RotationSpeed::new(50)?).await?;
/// fan.set_swing_mode(SwingMode::Enabled).await?;
/// # Ok(())
/// # }
/// ```
pub struct FanAccessory<P: Protocol + 'static> {
    name: String,
    device_id: String,
    protocol: Arc<P>,
    cache: Arc<StatusCache<P>>,
    callbacks: Arc<CallbackRegistry>,
    config: FanConfig,
}

impl<P: Protocol + 'static> FanAccessory<P> {
    /// Creates an accessory for the configured device.
    pub fn new(protocol: Arc<P>, config: FanConfig) -> Self {
        let cache = StatusCache::new(
            Arc::clone(&protocol),
            config.device_id(),
            config.throttle_window(),
        );
        Self {
            name: config.name().to_string(),
            device_id: config.device_id().to_string(),
            protocol,
            cache: Arc::new(cache),
            callbacks: Arc::new(CallbackRegistry::new()),
            config,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cloud device identifier.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the status cache backing the getters.
    #[must_use]
    pub fn status_cache(&self) -> &StatusCache<P> {
        &self.cache
    }

    /// Returns the latest resolved snapshot without querying.
    #[must_use]
    pub fn last_known_status(&self) -> Option<FanStatus> {
        self.cache.last_known()
    }

    // =========================================================================
    // Active
    // =========================================================================

    /// Returns whether the fan is running.
    ///
    /// # Errors
    ///
    /// Fails if the status cannot be read or does not report power.
    pub async fn get_active(&self) -> Result<Active, AccessoryError> {
        self.status()
            .await?
            .active()
            .ok_or(AccessoryError::from(Error::UnknownValue("isOn")))
    }

    /// Turns the fan on or off.
    ///
    /// # Errors
    ///
    /// Fails if the transport is not ready in time or the command fails.
    pub async fn set_active(&self, active: Active) -> Result<(), AccessoryError> {
        self.execute(FanCommand::PowerToggle {
            is_on: active.is_active(),
        })
        .await
    }

    // =========================================================================
    // Rotation speed
    // =========================================================================

    /// Returns the rotation speed of the current intensity level.
    ///
    /// # Errors
    ///
    /// Fails if the status cannot be read or does not report an intensity.
    pub async fn get_rotation_speed(&self) -> Result<RotationSpeed, AccessoryError> {
        self.status()
            .await?
            .rotation_speed()
            .ok_or(AccessoryError::from(Error::UnknownValue("fanIntensity")))
    }

    /// Selects the intensity level covering `speed`.
    ///
    /// A speed of 0 % turns the fan off instead of selecting a level.
    ///
    /// # Errors
    ///
    /// Fails if the transport is not ready in time or the command fails.
    pub async fn set_rotation_speed(&self, speed: RotationSpeed) -> Result<(), AccessoryError> {
        let command = match speed.intensity() {
            Some(level) => FanCommand::IntensityChange(level),
            None => FanCommand::off(),
        };
        self.execute(command).await
    }

    // =========================================================================
    // Swing mode
    // =========================================================================

    /// Returns whether the fan oscillates.
    ///
    /// # Errors
    ///
    /// Fails if the status cannot be read or does not report oscillation.
    pub async fn get_swing_mode(&self) -> Result<SwingMode, AccessoryError> {
        self.status()
            .await?
            .swing_mode()
            .ok_or(AccessoryError::from(Error::UnknownValue("isOscillating")))
    }

    /// Starts or stops oscillation.
    ///
    /// # Errors
    ///
    /// Fails if the transport is not ready in time or the command fails.
    pub async fn set_swing_mode(&self, swing: SwingMode) -> Result<(), AccessoryError> {
        self.execute(FanCommand::OscillationToggle {
            is_oscillating: swing.is_enabled(),
        })
        .await
    }

    // =========================================================================
    // Polling
    // =========================================================================

    /// Starts pushing changed characteristics to subscribers.
    ///
    /// Returns `None` when no polling interval is configured. Must be called
    /// from within a Tokio runtime.
    #[must_use = "polling stops when the handle is dropped"]
    pub fn start_polling(&self) -> Option<PollingHandle> {
        let interval = self.config.polling_interval()?;
        Some(poller::spawn(
            Arc::clone(&self.cache),
            Arc::clone(&self.callbacks),
            interval,
        ))
    }

    async fn status(&self) -> Result<FanStatus, AccessoryError> {
        Ok(self.cache.current().await?)
    }

    async fn execute(&self, command: FanCommand) -> Result<(), AccessoryError> {
        self.protocol.readiness().wait().await?;

        let action = command.to_wire_action();
        tracing::info!(
            device_id = %self.device_id,
            action = %action.action,
            mode = action.mode.as_deref().unwrap_or("-"),
            "Executing fan command"
        );

        self.protocol
            .execute_action(slice::from_ref(&self.device_id), &action)
            .await
            .map_err(|e| {
                tracing::warn!(device_id = %self.device_id, error = %e, "Fan command failed");
                Error::UpstreamCommand(e)
            })?;
        Ok(())
    }
}

impl<P: Protocol + 'static> Subscribable for FanAccessory<P> {
    fn on_active_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Active) + Send + Sync + 'static,
    {
        self.callbacks.on_active_changed(callback)
    }

    fn on_rotation_speed_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(RotationSpeed) + Send + Sync + 'static,
    {
        self.callbacks.on_rotation_speed_changed(callback)
    }

    fn on_swing_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(SwingMode) + Send + Sync + 'static,
    {
        self.callbacks.on_swing_mode_changed(callback)
    }

    fn on_status_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FanStatus) + Send + Sync + 'static,
    {
        self.callbacks.on_status_changed(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

impl<P: Protocol + 'static> fmt::Debug for FanAccessory<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanAccessory")
            .field("name", &self.name)
            .field("device_id", &self.device_id)
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
