// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for the cloud API session and the bridged fan.
//!
//! Both types can be built in code with `with_*` setters or deserialized
//! from the host's configuration file. Durations are expressed in
//! milliseconds when deserialized.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use alexa_fan_lib::config::{ApiConfig, FanConfig};
//!
//! let api = ApiConfig::new("session-id=...; ubid-main=...")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let fan = FanConfig::new("Bedroom Fan", "AAA_SonarCloudService_0001")
//!     .with_polling_interval(Duration::from_secs(30));
//!
//! assert_eq!(api.timeout(), Duration::from_secs(10));
//! assert_eq!(fan.name(), "Bedroom Fan");
//! ```

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Opaque session cookie sent verbatim with every API request.
///
/// The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SessionCookie(String);

impl SessionCookie {
    /// Wraps a raw cookie header value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw header value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCookie(<redacted>)")
    }
}

/// Settings for the cloud API session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    base_url: String,
    cookie: SessionCookie,
    #[serde(default)]
    csrf: Option<String>,
    #[serde(default = "default_timeout", with = "millis")]
    timeout: Duration,
    #[serde(default = "default_request_timeout", with = "millis")]
    request_timeout: Duration,
    #[serde(default = "default_init_attempts")]
    init_attempts: u32,
    #[serde(default = "default_retry_delay", with = "millis")]
    retry_delay: Duration,
}

impl ApiConfig {
    /// Default API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://alexa.amazon.com";

    /// Default time gated operations wait for the transport to become ready.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default timeout of a single HTTP request.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default number of session handshake attempts.
    pub const DEFAULT_INIT_ATTEMPTS: u32 = 3;

    /// Default pause between handshake attempts.
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

    /// Creates a configuration for the default endpoint.
    #[must_use]
    pub fn new(cookie: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            cookie: SessionCookie::new(cookie),
            csrf: None,
            timeout: Self::DEFAULT_TIMEOUT,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            init_attempts: Self::DEFAULT_INIT_ATTEMPTS,
            retry_delay: Self::DEFAULT_RETRY_DELAY,
        }
    }

    /// Sets the API endpoint, e.g. a regional domain.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the CSRF token sent alongside the cookie.
    #[must_use]
    pub fn with_csrf(mut self, csrf: impl Into<String>) -> Self {
        self.csrf = Some(csrf.into());
        self
    }

    /// Sets how long gated operations wait for readiness.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the timeout of a single HTTP request.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the number of handshake attempts. Zero is treated as one.
    #[must_use]
    pub fn with_init_attempts(mut self, attempts: u32) -> Self {
        self.init_attempts = attempts;
        self
    }

    /// Sets the pause between handshake attempts.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the session cookie.
    #[must_use]
    pub fn cookie(&self) -> &SessionCookie {
        &self.cookie
    }

    /// Returns the CSRF token, if any.
    #[must_use]
    pub fn csrf(&self) -> Option<&str> {
        self.csrf.as_deref()
    }

    /// Returns the readiness timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the number of handshake attempts.
    #[must_use]
    pub fn init_attempts(&self) -> u32 {
        self.init_attempts
    }

    /// Returns the pause between handshake attempts.
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Builds an HTTP client from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint or headers are invalid.
    #[cfg(feature = "http")]
    pub fn into_client(self) -> crate::Result<crate::protocol::AlexaHttpClient> {
        Ok(crate::protocol::AlexaHttpClient::new(&self)?)
    }
}

/// Settings for one bridged fan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanConfig {
    name: String,
    device_id: String,
    #[serde(default, with = "millis_opt")]
    polling_interval: Option<Duration>,
    #[serde(default = "default_throttle_window", with = "millis")]
    throttle_window: Duration,
}

impl FanConfig {
    /// Default delay before a status refresh is sent.
    pub const DEFAULT_THROTTLE_WINDOW: Duration = Duration::from_millis(50);

    /// Creates a fan configuration without polling.
    #[must_use]
    pub fn new(name: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_id: device_id.into(),
            polling_interval: None,
            throttle_window: Self::DEFAULT_THROTTLE_WINDOW,
        }
    }

    /// Enables background polling at the given interval.
    #[must_use]
    pub fn with_polling_interval(mut self, interval: Duration) -> Self {
        self.polling_interval = Some(interval);
        self
    }

    /// Sets the coalescing window for status refreshes.
    #[must_use]
    pub fn with_throttle_window(mut self, window: Duration) -> Self {
        self.throttle_window = window;
        self
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

    /// Returns the polling interval. `None` or zero disables polling.
    #[must_use]
    pub fn polling_interval(&self) -> Option<Duration> {
        self.polling_interval.filter(|interval| !interval.is_zero())
    }

    /// Returns the coalescing window.
    #[must_use]
    pub fn throttle_window(&self) -> Duration {
        self.throttle_window
    }
}

fn default_base_url() -> String {
    ApiConfig::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    ApiConfig::DEFAULT_TIMEOUT
}

fn default_request_timeout() -> Duration {
    ApiConfig::DEFAULT_REQUEST_TIMEOUT
}

fn default_init_attempts() -> u32 {
    ApiConfig::DEFAULT_INIT_ATTEMPTS
}

fn default_retry_delay() -> Duration {
    ApiConfig::DEFAULT_RETRY_DELAY
}

fn default_throttle_window() -> Duration {
    FanConfig::DEFAULT_THROTTLE_WINDOW
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

mod millis_opt {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
