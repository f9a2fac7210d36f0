// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport boundary to the cloud API.
//!
//! The status cache and the accessory need the transport to report readiness
//! and to query and control devices. [`Protocol`] is that boundary; the core
//! runs against the HTTP implementation or any other transport.
//!
//! # Implementations
//!
//! - [`AlexaHttpClient`]: the vendor's web API over HTTPS (feature `http`)

#[cfg(feature = "http")]
mod http;
mod readiness;

#[cfg(feature = "http")]
pub use http::{AlexaHttpClient, BOOTSTRAP_PATH, PHOENIX_STATE_PATH};
pub use readiness::ReadinessGate;

use std::future::Future;

use crate::command::WireAction;
use crate::error::ProtocolError;
use crate::response::DeviceQueryResult;

/// Transport capable of querying and controlling devices.
///
/// Query and command futures must be `Send` so the status cache can drive
/// them from a background task.
pub trait Protocol: Send + Sync {
    /// Returns the gate signalling that the transport is initialized.
    fn readiness(&self) -> &ReadinessGate;

    /// Queries the capability states of one device.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails.
    fn query_device_states(
        &self,
        device_id: &str,
    ) -> impl Future<Output = Result<DeviceQueryResult, ProtocolError>> + Send;

    /// Executes an action against one or more devices.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the API rejects it.
    fn execute_action(
        &self,
        device_ids: &[String],
        action: &WireAction,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}
