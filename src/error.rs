// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the fan bridge.
//!
//! This module provides the error hierarchy used across the library: value
//! validation, transport communication, capability-state parsing, and the
//! failures surfaced to the accessory framework.

use std::sync::Arc;

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred in the transport outside of a query or command.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a device query result.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The transport did not become ready in time.
    #[error("transport was not initialized within {timeout_ms} ms")]
    InitializationTimeout {
        /// How long the caller waited, in milliseconds.
        timeout_ms: u64,
    },

    /// The status query failed at the transport level.
    #[error("status query failed: {0}")]
    UpstreamQuery(#[source] ProtocolError),

    /// The command failed at the transport level.
    #[error("command execution failed: {0}")]
    UpstreamCommand(#[source] ProtocolError),

    /// The latest status does not report a value for this field.
    #[error("no known value for {0}")]
    UnknownValue(&'static str),

    /// A status refresh shared between several callers failed.
    #[error(transparent)]
    Refresh(Arc<Error>),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A fan intensity code outside `0..=3`.
    #[error("unsupported fan intensity: {0}")]
    UnsupportedIntensity(String),

    /// A shutdown timer code outside `0..=4`.
    #[error("unsupported shutdown timer value: {0}")]
    UnsupportedShutdownTimer(String),
}

/// Errors related to communication with the cloud API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the API failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A configured header value cannot be sent.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// The session cookie was refused.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The API accepted the request but reported an error for it.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Errors related to parsing device query results.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The query result did not contain any device entry.
    #[error("query result contains no device state")]
    NoDeviceState,

    /// The intensity capability reported a value outside the known levels.
    #[error("unsupported fan intensity: {0}")]
    UnsupportedIntensity(String),
}

/// Failure reported back to the accessory framework for a get or set.
#[derive(Debug, Error)]
pub enum AccessoryError {
    /// The device could not be reached or reported an unusable state.
    #[error("service communication failure: {0}")]
    ServiceCommunicationFailure(#[from] Error),
}

impl AccessoryError {
    /// Returns the underlying library error.
    #[must_use]
    pub fn cause(&self) -> &Error {
        match self {
            Self::ServiceCommunicationFailure(err) => err,
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn error_from_parse_error() {
        let err: Error = ParseError::NoDeviceState.into();
        assert!(matches!(err, Error::Parse(ParseError::NoDeviceState)));
    }

    #[test]
    fn initialization_timeout_display() {
        let err = Error::InitializationTimeout { timeout_ms: 30_000 };
        assert_eq!(
            err.to_string(),
            "transport was not initialized within 30000 ms"
        );
    }

    #[test]
    fn refresh_error_is_transparent() {
        let inner = Error::Parse(ParseError::UnsupportedIntensity("9".to_string()));
        let err = Error::Refresh(Arc::new(inner));
        assert_eq!(err.to_string(), "parse error: unsupported fan intensity: 9");
    }

    #[test]
    fn accessory_error_wraps_cause() {
        let err = AccessoryError::from(Error::UnknownValue("isOn"));
        assert!(matches!(err.cause(), Error::UnknownValue("isOn")));
        assert_eq!(
            err.to_string(),
            "service communication failure: no known value for isOn"
        );
    }
}
