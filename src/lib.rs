// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `alexa_fan_lib` - Bridge an oscillating fan on the Alexa cloud to
//! accessory characteristics.
//!
//! The fan is exposed as three characteristics: power (`Active`), rotation
//! speed in 25 % steps and swing mode. Reads are answered from a coalescing
//! status cache so a burst of getters costs one upstream query; writes are
//! sent straight through as cloud API actions.
//!
//! # Supported Features
//!
//! - **Power control**: Turn the fan on and off
//! - **Intensity**: Four levels mapped to 25/50/75/100 %
//! - **Oscillation**: Start and stop swinging
//! - **Polling**: Push changed characteristics to subscribers
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use alexa_fan_lib::accessory::FanAccessory;
//! use alexa_fan_lib::config::{ApiConfig, FanConfig};
//! use alexa_fan_lib::subscription::Subscribable;
//! use alexa_fan_lib::types::Active;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(ApiConfig::new("session-id=...; ubid-main=...").into_client()?);
//!     client.initialize().await?;
//!
//!     let config = FanConfig::new("Bedroom Fan", "AAA_SonarCloudService_0001")
//!         .with_polling_interval(std::time::Duration::from_secs(30));
//!     let fan = FanAccessory::new(client, config);
//!
//!     fan.on_active_changed(|active| println!("Fan is now {active}"));
//!     let _polling = fan.start_polling();
//!
//!     fan.set_active(Active::Active).await?;
//!     println!("Speed: {}", fan.get_rotation_speed().await?);
//!     Ok(())
//! }
//! ```
//!
//! # Custom Transports
//!
//! Everything above the HTTP client is generic over [`protocol::Protocol`].
//! Disabling the default `http` feature removes `reqwest` from the build.

pub mod accessory;
pub mod command;
pub mod config;
pub mod error;
pub mod protocol;
pub mod response;
pub mod state;
pub mod status_cache;
pub mod subscription;
pub mod types;

pub use accessory::{FanAccessory, PollingHandle};
pub use command::{Command, FanCommand, WireAction};
pub use config::{ApiConfig, FanConfig};
pub use error::{AccessoryError, Error, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::AlexaHttpClient;
pub use protocol::{Protocol, ReadinessGate};
pub use state::{CharacteristicUpdate, FanStatus};
pub use status_cache::{PollOutcome, StatusCache};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{Active, FanIntensity, RotationSpeed, ShutdownTimer, SwingMode};
