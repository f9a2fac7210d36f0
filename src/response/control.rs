// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control request results.

use serde::Deserialize;
use serde_json::Value;

use crate::response::QueryError;

/// Reply to a control request.
///
/// The API reports per-device failures in `errors` even when the HTTP status
/// is successful.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlResult {
    /// Per-device acknowledgements.
    #[serde(default)]
    pub control_responses: Vec<Value>,
    /// Per-device failures.
    #[serde(default)]
    pub errors: Vec<QueryError>,
}

impl ControlResult {
    /// Returns `true` if no device reported a failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Joins all reported failures into one message.
    #[must_use]
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reply_is_success() {
        let result: ControlResult = serde_json::from_str("{}").unwrap();
        assert!(result.is_success());
    }

    #[test]
    fn errors_are_summarized() {
        let json = r#"{
            "controlResponses": [],
            "errors": [
                { "code": "ENDPOINT_UNREACHABLE", "message": "offline" },
                { "code": "INVALID_VALUE" }
            ]
        }"#;
        let result: ControlResult = serde_json::from_str(json).unwrap();
        assert!(!result.is_success());
        assert_eq!(
            result.error_summary(),
            "ENDPOINT_UNREACHABLE: offline; INVALID_VALUE"
        );
    }
}
