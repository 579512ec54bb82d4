// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the notifier.
//!
//! Failures are grouped by concern: configuration loading, device HTTP
//! communication, response parsing and email delivery. Only configuration
//! errors and an unreachable device at startup are fatal; the rest are
//! contained by the component that hits them.

use thiserror::Error;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Required settings are missing or a setting has an invalid value.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Communication with a device failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A device response could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Sending a notification email failed.
    #[error("notification error: {0}")]
    Notify(#[from] NotifyError),

    /// A device did not answer during startup.
    #[error("failed to get initial system info for {name}")]
    DeviceUnreachable {
        /// Display name of the device.
        name: String,
    },

    /// A configured device has no entry in the state store.
    #[error("no state recorded for device {0}")]
    UnknownDevice(String),
}

/// Errors raised while loading settings from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// None of the required settings are present.
    #[error(
        "Missing or empty \".env\" file. Make sure to copy and rename \".env.example\" to \".env\" and replace the values with your own."
    )]
    MissingConfigFile,

    /// Some, but not all, required settings are present.
    #[error("Missing required environment variable(s): {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    /// An optional setting is present but cannot be parsed.
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        /// The environment variable name.
        key: String,
        /// The raw value found.
        value: String,
        /// What the variable should contain.
        expected: &'static str,
    },
}

/// Errors related to HTTP communication with a device.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The device refused or never accepted the connection.
    #[error("Connection refused. Please check the IP address.")]
    ConnectionRefused(String),

    /// Any other request failure, including timeouts.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status.
    #[error("HTTP {code} - {reason}")]
    Status {
        /// Numeric status code.
        code: u16,
        /// Canonical reason phrase.
        reason: String,
    },
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body is not valid JSON or does not match the expected shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(&'static str),

    /// A field has a type the device is not known to send.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: &'static str,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors raised while sending a notification email.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The SMTP server rejected the credentials.
    #[error("Gmail user or app password not accepted.")]
    Authentication(String),

    /// SMTP transport-level failure (connection, TLS, rejected message).
    #[error("{0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The sender or recipient address could not be parsed.
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("failed to build email: {0}")]
    Build(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_display() {
        let err = ConfigError::MissingVariables(vec![
            "GMAIL_USER".to_string(),
            "RECIPIENT".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required environment variable(s): GMAIL_USER, RECIPIENT"
        );
    }

    #[test]
    fn missing_config_file_mentions_env_file() {
        let err = ConfigError::MissingConfigFile;
        assert!(err.to_string().starts_with("Missing or empty \".env\" file."));
    }

    #[test]
    fn error_from_config_error() {
        let err: Error = ConfigError::MissingConfigFile.into();
        assert!(matches!(err, Error::Config(ConfigError::MissingConfigFile)));
    }

    #[test]
    fn status_error_display() {
        let err = ProtocolError::Status {
            code: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 - Service Unavailable");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("bestDiff");
        assert_eq!(err.to_string(), "missing field in response: bestDiff");
    }

    #[test]
    fn address_error_display() {
        let addr_err = "not-an-email".parse::<lettre::Address>().unwrap_err();
        let err = NotifyError::Address(addr_err);
        assert!(err.to_string().starts_with("invalid email address"));
    }
}
