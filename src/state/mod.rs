// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan status types.
//!
//! This module provides the normalized [`FanStatus`] snapshot, the parser
//! that produces it from raw query results, and the [`CharacteristicUpdate`]
//! values derived from it for the accessory framework.
//!
//! # Examples
//!
//! ```
//! use alexa_fan_lib::state::{CharacteristicUpdate, FanStatus};
//! use alexa_fan_lib::types::Active;
//!
//! let status = FanStatus::new().with_on(true);
//! assert_eq!(
//!     status.characteristic_updates(),
//!     vec![CharacteristicUpdate::Active(Active::Active)]
//! );
//! ```

mod characteristic_update;
mod fan_status;
mod state_parser;

pub use characteristic_update::CharacteristicUpdate;
pub use fan_status::FanStatus;
pub use state_parser::parse_query_result;
