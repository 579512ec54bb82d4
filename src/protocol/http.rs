// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the device status API.

use std::time::Duration;

use reqwest::Client;

use crate::error::{Error, ProtocolError};
use crate::protocol::StatusSource;
use crate::response::{StatusSnapshot, SystemInfoResponse};

/// Path of the status endpoint on every device.
pub const SYSTEM_INFO_PATH: &str = "/api/system/info";

/// HTTP client for polling devices.
///
/// One client is shared by all devices; each poll is an independent GET.
///
/// # Examples
///
/// ```no_run
/// use bitaxe_notifier::protocol::{DeviceClient, StatusSource};
///
/// # async fn example() -> bitaxe_notifier::Result<()> {
/// let client = DeviceClient::new()?;
/// if let Some(status) = client.fetch_status("192.168.1.50").await {
///     println!("best difficulty: {}", status.best_diff);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeviceClient {
    client: Client,
    timeout: Duration,
}

impl DeviceClient {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ProtocolError> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProtocolError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self { client, timeout })
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the status URL for a device address.
    #[must_use]
    pub fn status_url(address: &str) -> String {
        let base = if address.starts_with("http://") || address.starts_with("https://") {
            address.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", address.trim_end_matches('/'))
        };
        format!("{base}{SYSTEM_INFO_PATH}")
    }

    /// Fetches the status of a device, keeping the failure reason.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::ConnectionRefused`] if no connection could be
    /// made, another [`ProtocolError`] for timeouts and non-2xx answers, and
    /// a [`ParseError`](crate::error::ParseError) for malformed bodies.
    pub async fn try_fetch_status(&self, address: &str) -> Result<StatusSnapshot, Error> {
        let url = Self::status_url(address);

        tracing::debug!(url = %url, "Polling device");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_connect() {
                ProtocolError::ConnectionRefused(address.to_string())
            } else {
                ProtocolError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::trace!(body = %body, "Received system info");

        Ok(SystemInfoResponse::from_json(&body)?.into_snapshot()?)
    }
}

impl StatusSource for DeviceClient {
    async fn fetch_status(&self, address: &str) -> Option<StatusSnapshot> {
        match self.try_fetch_status(address).await {
            Ok(snapshot) => Some(snapshot),
            Err(Error::Protocol(ProtocolError::ConnectionRefused(_))) => {
                tracing::error!(
                    "API request failed for {address}: Connection refused. Please check the IP address."
                );
                None
            }
            Err(e) => {
                tracing::error!("API request failed for {address}: {e}");
                None
            }
        }
    }
}
