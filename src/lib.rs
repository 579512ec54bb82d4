// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bitaxe Notifier - email alerts for network-attached Bitaxe miners.
//!
//! The notifier polls each configured device's `/api/system/info` endpoint
//! on a fixed interval and sends an email when:
//!
//! - overheat mode turns on,
//! - the device finds a new all-time best difficulty,
//! - the device finds a new best difficulty since its last reboot.
//!
//! # Components
//!
//! - [`config`]: settings read from the environment
//! - [`protocol`]: HTTP client for the device status API
//! - [`response`]: parsing of device status responses
//! - [`notifier`]: email delivery over SMTP
//! - [`state`]: last known state per device and transition detection
//! - [`monitor`]: the poll loop tying everything together
//! - [`logging`]: console and file log output
//!
//! # Quick Start
//!
//! ```no_run
//! use bitaxe_notifier::config::Settings;
//! use bitaxe_notifier::monitor::Monitor;
//! use bitaxe_notifier::notifier::EmailNotifier;
//! use bitaxe_notifier::protocol::DeviceClient;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> bitaxe_notifier::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let monitor = Monitor::new(
//!         &settings,
//!         DeviceClient::new()?,
//!         EmailNotifier::new(settings.smtp.clone()),
//!     );
//!
//!     let mut store = monitor.initialize().await?;
//!     monitor.run(&mut store).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod notifier;
pub mod protocol;
pub mod response;
pub mod state;

pub use config::{DeviceConfig, NotificationToggles, Settings, SmtpConfig};
pub use error::{ConfigError, Error, NotifyError, ParseError, ProtocolError, Result};
pub use monitor::Monitor;
pub use notifier::{EmailNotifier, Notifier};
pub use protocol::{DeviceClient, StatusSource};
pub use response::StatusSnapshot;
pub use state::{DeviceState, StateChange, StateStore};
