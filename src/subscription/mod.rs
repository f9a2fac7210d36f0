// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for characteristic updates.
//!
//! The subscription system consists of:
//!
//! - [`SubscriptionId`] - A unique identifier for a subscription, used to unsubscribe
//! - [`CallbackRegistry`] - Registry that stores callbacks and dispatches updates
//! - [`Subscribable`] - Trait for accessories that push updates
//!
//! The accessory's periodic poller is the only producer. Without polling
//! registered callbacks are never invoked.

mod callback;
mod subscribable;

pub use callback::{CallbackRegistry, SubscriptionId};
pub use subscribable::Subscribable;
