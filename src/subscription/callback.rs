// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for characteristic subscriptions.
//!
//! This module provides the core types for managing subscription callbacks:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::{CharacteristicUpdate, FanStatus};
use crate::types::{Active, RotationSpeed, SwingMode};

/// Unique identifier for a subscription.
///
/// This ID is returned when creating a subscription and can be used to
/// unsubscribe later. IDs are unique within an accessory's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type ActiveCallback = Arc<dyn Fn(Active) + Send + Sync>;
type RotationSpeedCallback = Arc<dyn Fn(RotationSpeed) + Send + Sync>;
type SwingModeCallback = Arc<dyn Fn(SwingMode) + Send + Sync>;
type StatusCallback = Arc<dyn Fn(&FanStatus) + Send + Sync>;

/// Registry for characteristic update callbacks.
///
/// This is the sink the periodic poller pushes into. Callbacks are stored
/// behind `parking_lot::RwLock`s and may be registered or removed from any
/// task while dispatch is running elsewhere.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    active_callbacks: RwLock<HashMap<SubscriptionId, ActiveCallback>>,
    rotation_speed_callbacks: RwLock<HashMap<SubscriptionId, RotationSpeedCallback>>,
    swing_mode_callbacks: RwLock<HashMap<SubscriptionId, SwingModeCallback>>,
    /// Receive every changed snapshot, including disconnected ones.
    status_callbacks: RwLock<HashMap<SubscriptionId, StatusCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            active_callbacks: RwLock::new(HashMap::new()),
            rotation_speed_callbacks: RwLock::new(HashMap::new()),
            swing_mode_callbacks: RwLock::new(HashMap::new()),
            status_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for power changes.
    pub fn on_active_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Active) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.active_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for rotation speed changes.
    pub fn on_rotation_speed_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(RotationSpeed) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.rotation_speed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for swing mode changes.
    pub fn on_swing_mode_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(SwingMode) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.swing_mode_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for whole-snapshot changes.
    pub fn on_status_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FanStatus) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.status_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.active_callbacks.write().remove(&id).is_some()
            || self.rotation_speed_callbacks.write().remove(&id).is_some()
            || self.swing_mode_callbacks.write().remove(&id).is_some()
            || self.status_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.active_callbacks.write().clear();
        self.rotation_speed_callbacks.write().clear();
        self.swing_mode_callbacks.write().clear();
        self.status_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Dispatches one characteristic update to the matching callbacks.
    pub fn dispatch(&self, update: &CharacteristicUpdate) {
        match *update {
            CharacteristicUpdate::Active(active) => {
                let callbacks = self.active_callbacks.read();
                for callback in callbacks.values() {
                    callback(active);
                }
            }
            CharacteristicUpdate::RotationSpeed(speed) => {
                let callbacks = self.rotation_speed_callbacks.read();
                for callback in callbacks.values() {
                    callback(speed);
                }
            }
            CharacteristicUpdate::SwingMode(swing) => {
                let callbacks = self.swing_mode_callbacks.read();
                for callback in callbacks.values() {
                    callback(swing);
                }
            }
        }
    }

    /// Dispatches a changed snapshot to the status callbacks.
    pub fn dispatch_status(&self, status: &FanStatus) {
        let callbacks = self.status_callbacks.read();
        for callback in callbacks.values() {
            callback(status);
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.active_callbacks.read().len()
            + self.rotation_speed_callbacks.read().len()
            + self.swing_mode_callbacks.read().len()
            + self.status_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        assert_eq!(SubscriptionId::new(42).to_string(), "Sub(42)");
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
    }

    #[test]
    fn active_callback_and_unsubscribe() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.on_active_changed(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(registry.callback_count(), 1);

        registry.dispatch(&CharacteristicUpdate::Active(Active::Active));
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        assert!(registry.unsubscribe(id));
        assert!(registry.is_empty());

        registry.dispatch(&CharacteristicUpdate::Active(Active::Inactive));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_reaches_only_matching_callbacks() {
        let registry = CallbackRegistry::new();
        let speed = Arc::new(RwLock::new(None::<RotationSpeed>));
        let swing_calls = Arc::new(AtomicU32::new(0));

        let speed_clone = speed.clone();
        registry.on_rotation_speed_changed(move |value| {
            *speed_clone.write() = Some(value);
        });
        let swing_clone = swing_calls.clone();
        registry.on_swing_mode_changed(move |_| {
            swing_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(&CharacteristicUpdate::RotationSpeed(RotationSpeed::clamped(75)));

        assert_eq!(*speed.read(), Some(RotationSpeed::clamped(75)));
        assert_eq!(swing_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn status_callback_receives_snapshot() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(RwLock::new(None::<FanStatus>));
        let received_clone = received.clone();

        registry.on_status_changed(move |status| {
            *received_clone.write() = Some(status.clone());
        });

        registry.dispatch_status(&FanStatus::disconnected());
        assert_eq!(*received.read(), Some(FanStatus::disconnected()));
    }

    #[test]
    fn multiple_callbacks_same_type() {
        let registry = CallbackRegistry::new();
        let counter1 = Arc::new(AtomicU32::new(0));
        let counter2 = Arc::new(AtomicU32::new(0));
        let c1 = counter1.clone();
        let c2 = counter2.clone();

        registry.on_swing_mode_changed(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        registry.on_swing_mode_changed(move |_| {
            c2.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(&CharacteristicUpdate::SwingMode(SwingMode::Enabled));

        assert_eq!(counter1.load(Ordering::SeqCst), 1);
        assert_eq!(counter2.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_unknown_id() {
        let registry = CallbackRegistry::new();
        assert!(!registry.unsubscribe(SubscriptionId::new(999)));
    }

    #[test]
    fn clear_and_unique_ids() {
        let registry = CallbackRegistry::new();

        let id1 = registry.on_active_changed(|_| {});
        let id2 = registry.on_rotation_speed_changed(|_| {});
        let id3 = registry.on_status_changed(|_| {});

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_eq!(registry.callback_count(), 3);

        registry.clear();
        assert!(registry.is_empty());
    }
}
