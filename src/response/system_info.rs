// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `/api/system/info` response parsing.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;

/// The fields of a device status that drive notifications.
///
/// Difficulties are kept exactly as the device formats them (`"4.29G"`,
/// `"0"`); they are compared as strings, never as numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Thermal protection is active.
    pub overheat_mode: bool,
    /// Highest difficulty ever found by the device.
    pub best_diff: String,
    /// Highest difficulty found since the last reboot.
    pub best_session_diff: String,
}

impl StatusSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub fn new(
        overheat_mode: bool,
        best_diff: impl Into<String>,
        best_session_diff: impl Into<String>,
    ) -> Self {
        Self {
            overheat_mode,
            best_diff: best_diff.into(),
            best_session_diff: best_session_diff.into(),
        }
    }
}

/// Raw system info as returned by the device firmware.
///
/// Only the fields used for notifications are kept. They are held as loose
/// JSON values because firmware revisions disagree on their types:
/// `overheat_mode` is a boolean on some and `0`/`1` on others.
///
/// # Examples
///
/// ```
/// use bitaxe_notifier::response::SystemInfoResponse;
///
/// let json = r#"{
///     "hostname": "bitaxe",
///     "overheat_mode": 0,
///     "bestDiff": "4.29G",
///     "bestSessionDiff": "1.02M"
/// }"#;
/// let response: SystemInfoResponse = serde_json::from_str(json).unwrap();
/// let snapshot = response.into_snapshot().unwrap();
/// assert!(!snapshot.overheat_mode);
/// assert_eq!(snapshot.best_diff, "4.29G");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemInfoResponse {
    #[serde(default)]
    overheat_mode: Option<Value>,

    #[serde(rename = "bestDiff", default)]
    best_diff: Option<Value>,

    #[serde(rename = "bestSessionDiff", default)]
    best_session_diff: Option<Value>,
}

impl SystemInfoResponse {
    /// Parses a raw response body.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not a JSON object.
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        serde_json::from_str(body).map_err(Into::into)
    }

    /// Converts the raw fields into a [`StatusSnapshot`].
    ///
    /// # Errors
    ///
    /// Returns error if a field is missing or has an unsupported type.
    pub fn into_snapshot(self) -> Result<StatusSnapshot, ParseError> {
        Ok(StatusSnapshot {
            overheat_mode: parse_flag("overheat_mode", self.overheat_mode)?,
            best_diff: parse_difficulty("bestDiff", self.best_diff)?,
            best_session_diff: parse_difficulty("bestSessionDiff", self.best_session_diff)?,
        })
    }
}

fn parse_flag(field: &'static str, value: Option<Value>) -> Result<bool, ParseError> {
    match value {
        Some(Value::Bool(flag)) => Ok(flag),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(ParseError::InvalidValue {
                field,
                message: format!("expected 0 or 1, got {n}"),
            }),
        },
        Some(other) => Err(ParseError::InvalidValue {
            field,
            message: format!("expected boolean, got {other}"),
        }),
        None | Some(Value::Null) => Err(ParseError::MissingField(field)),
    }
}

fn parse_difficulty(field: &'static str, value: Option<Value>) -> Result<String, ParseError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(ParseError::InvalidValue {
            field,
            message: format!("expected string, got {other}"),
        }),
        None | Some(Value::Null) => Err(ParseError::MissingField(field)),
    }
}
