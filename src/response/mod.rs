// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw wire records returned by the cloud API.
//!
//! These structures mirror the JSON the API sends back. They are transient:
//! a query result is consumed once by the status parser in
//! [`state`](crate::state), which turns it into a
//! [`FanStatus`](crate::state::FanStatus).

mod capability;
mod control;
mod device_state;

pub use capability::{CapabilityState, Namespace};
pub use control::ControlResult;
pub use device_state::{DeviceQueryResult, DeviceStateBundle, Entity, QueryError};
