// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for fan control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time.
//!
//! # Types
//!
//! - [`FanIntensity`] - Hardware intensity level (0-3)
//! - [`ShutdownTimer`] - Reported shutdown timer code (0-4)
//! - [`RotationSpeed`] - Framework rotation-speed percentage (0-100)
//! - [`Active`] - Power characteristic
//! - [`SwingMode`] - Oscillation characteristic

mod characteristic;
mod intensity;
mod rotation_speed;
mod shutdown_timer;

pub use characteristic::{Active, SwingMode};
pub use intensity::FanIntensity;
pub use rotation_speed::RotationSpeed;
pub use shutdown_timer::ShutdownTimer;
