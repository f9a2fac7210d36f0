// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the Alexa smart-home web API.

use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::command::WireAction;
use crate::config::ApiConfig;
use crate::error::ProtocolError;
use crate::protocol::{Protocol, ReadinessGate};
use crate::response::{ControlResult, DeviceQueryResult, Entity};

/// Path of the session handshake endpoint.
pub const BOOTSTRAP_PATH: &str = "/api/bootstrap";

/// Path of the device state endpoint (POST queries, PUT controls).
pub const PHOENIX_STATE_PATH: &str = "/api/phoenix/state";

const CSRF_HEADER: HeaderName = HeaderName::from_static("csrf");

/// HTTP client for the Alexa smart-home web API.
///
/// Every request carries the configured session cookie verbatim. The client
/// starts unready; [`initialize`](Self::initialize) performs the session
/// handshake and opens the [`ReadinessGate`].
///
/// # Examples
///
/// ```no_run
/// use alexa_fan_lib::config::ApiConfig;
/// use alexa_fan_lib::protocol::AlexaHttpClient;
///
/// # async fn example() -> alexa_fan_lib::Result<()> {
/// let client = ApiConfig::new("session-id=...; ubid-main=...")
///     .with_base_url("https://alexa.amazon.de")
///     .into_client()?;
///
/// client.initialize().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AlexaHttpClient {
    base_url: String,
    client: Client,
    readiness: ReadinessGate,
    request_timeout: Duration,
    init_attempts: u32,
    retry_delay: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateRequestBody {
    state_requests: Vec<Entity>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ControlRequestBody<'a> {
    control_requests: Vec<ControlRequest<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ControlRequest<'a> {
    entity_id: &'a str,
    entity_type: &'static str,
    parameters: &'a WireAction,
}

#[derive(Debug, Default, Deserialize)]
struct BootstrapResponse {
    #[serde(default)]
    authentication: Option<Authentication>,
}

#[derive(Debug, Default, Deserialize)]
struct Authentication {
    #[serde(default)]
    authenticated: bool,
}

impl AlexaHttpClient {
    /// Creates a client from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an HTTP(S) URL, the cookie or
    /// CSRF token cannot be sent as a header, or the HTTP client cannot be
    /// created.
    pub fn new(config: &ApiConfig) -> Result<Self, ProtocolError> {
        let base_url = config.base_url().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ProtocolError::InvalidAddress(base_url));
        }

        let mut headers = HeaderMap::new();
        let mut cookie = HeaderValue::from_str(config.cookie().as_str())
            .map_err(|_| ProtocolError::InvalidHeader("cookie"))?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);

        if let Some(token) = config.csrf() {
            let mut csrf =
                HeaderValue::from_str(token).map_err(|_| ProtocolError::InvalidHeader("csrf"))?;
            csrf.set_sensitive(true);
            headers.insert(CSRF_HEADER, csrf);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self {
            base_url,
            client,
            readiness: ReadinessGate::new(config.timeout()),
            request_timeout: config.request_timeout(),
            init_attempts: config.init_attempts().max(1),
            retry_delay: config.retry_delay(),
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs the session handshake and marks the transport ready.
    ///
    /// Each failed attempt is reported on the readiness gate before the next
    /// one is made. The gate stays unready when every attempt fails, so
    /// gated operations time out instead of running against a dead session.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt.
    pub async fn initialize(&self) -> Result<(), ProtocolError> {
        let mut attempt = 1;
        loop {
            match self.bootstrap().await {
                Ok(()) => {
                    tracing::info!(attempt, "Session handshake succeeded");
                    self.readiness.signal_ready();
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        attempts = self.init_attempts,
                        error = %e,
                        "Session handshake failed"
                    );
                    self.readiness.signal_attempt_failed();
                    if attempt >= self.init_attempts {
                        return Err(e);
                    }
                }
            }
            attempt += 1;
            tokio::time::sleep(self.retry_delay).await;
        }
    }

    async fn bootstrap(&self) -> Result<(), ProtocolError> {
        let url = format!("{}{BOOTSTRAP_PATH}?version=0", self.base_url);
        tracing::debug!(url = %url, "Sending session handshake");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let body: BootstrapResponse = check_status(response)?.json().await?;

        match body.authentication {
            Some(auth) if auth.authenticated => Ok(()),
            _ => Err(ProtocolError::AuthenticationFailed),
        }
    }

    fn send_error(&self, e: reqwest::Error) -> ProtocolError {
        if e.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.request_timeout.as_millis()).unwrap_or(u64::MAX))
        } else {
            ProtocolError::Http(e)
        }
    }

    fn state_url(&self) -> String {
        format!("{}{PHOENIX_STATE_PATH}", self.base_url)
    }
}

impl Protocol for AlexaHttpClient {
    fn readiness(&self) -> &ReadinessGate {
        &self.readiness
    }

    async fn query_device_states(&self, device_id: &str) -> Result<DeviceQueryResult, ProtocolError> {
        let body = StateRequestBody {
            state_requests: vec![Entity::appliance(device_id)],
        };

        tracing::debug!(device_id, "Querying device state");

        let response = self
            .client
            .post(self.state_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let result: DeviceQueryResult = check_status(response)?.json().await?;

        tracing::debug!(
            device_id,
            devices = result.device_states.len(),
            errors = result.errors.len(),
            "Received device state"
        );

        Ok(result)
    }

    async fn execute_action(
        &self,
        device_ids: &[String],
        action: &WireAction,
    ) -> Result<(), ProtocolError> {
        let body = ControlRequestBody {
            control_requests: device_ids
                .iter()
                .map(|id| ControlRequest {
                    entity_id: id,
                    entity_type: "APPLIANCE",
                    parameters: action,
                })
                .collect(),
        };

        tracing::debug!(?device_ids, action = %action.action, "Sending control request");

        let response = self
            .client
            .put(self.state_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;
        let result: ControlResult = check_status(response)?.json().await?;

        if result.is_success() {
            Ok(())
        } else {
            Err(ProtocolError::Rejected(result.error_summary()))
        }
    }
}

fn check_status(response: Response) -> Result<Response, ProtocolError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ProtocolError::AuthenticationFailed);
    }
    if !status.is_success() {
        return Err(ProtocolError::ConnectionFailed(format!(
            "HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig::new("cookie=1").with_base_url("https://alexa.amazon.de/");
        let client = AlexaHttpClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "https://alexa.amazon.de");
        assert_eq!(client.state_url(), "https://alexa.amazon.de/api/phoenix/state");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = ApiConfig::new("cookie=1").with_base_url("alexa.amazon.de");
        assert!(matches!(
            AlexaHttpClient::new(&config),
            Err(ProtocolError::InvalidAddress(_))
        ));
    }

    #[test]
    fn rejects_unsendable_cookie() {
        let config = ApiConfig::new("bad\ncookie");
        assert!(matches!(
            AlexaHttpClient::new(&config),
            Err(ProtocolError::InvalidHeader("cookie"))
        ));
    }

    #[test]
    fn new_client_is_not_ready() {
        let client = AlexaHttpClient::new(&ApiConfig::new("cookie=1")).unwrap();
        assert!(!client.readiness().is_ready());
        assert_eq!(client.readiness().timeout(), ApiConfig::DEFAULT_TIMEOUT);
    }

    #[test]
    fn control_request_body_shape() {
        let action = WireAction {
            action: "setModeValue".to_string(),
            instance: Some("1".to_string()),
            mode: Some("2".to_string()),
        };
        let body = ControlRequestBody {
            control_requests: vec![ControlRequest {
                entity_id: "fan-1",
                entity_type: "APPLIANCE",
                parameters: &action,
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "controlRequests": [{
                    "entityId": "fan-1",
                    "entityType": "APPLIANCE",
                    "parameters": { "action": "setModeValue", "instance": "1", "mode": "2" }
                }]
            })
        );
    }
}
