// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settings loaded from the process environment.
//!
//! | Variable                                | Required | Default        |
//! |-----------------------------------------|----------|----------------|
//! | `BITAXE_{N}_IP`                         | N = 1    | -              |
//! | `BITAXE_{N}_NAME`                       | no       | `Device {N}`   |
//! | `GMAIL_USER`                            | yes      | -              |
//! | `GMAIL_APP_PASSWORD`                    | yes      | -              |
//! | `RECIPIENT`                             | yes      | -              |
//! | `POLLING_INTERVAL_SECONDS`              | no       | `60`           |
//! | `NOTIFY_ON_OVERHEAT`                    | no       | `true`         |
//! | `NOTIFY_ON_NEW_BEST_DIFFICULTY`         | no       | `true`         |
//! | `NOTIFY_ON_NEW_BEST_SESSION_DIFFICULTY` | no       | `true`         |
//!
//! Empty values are treated as absent.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use bitaxe_notifier::config::Settings;
//!
//! let env: HashMap<&str, &str> = HashMap::from([
//!     ("BITAXE_1_IP", "192.168.1.50"),
//!     ("GMAIL_USER", "miner@gmail.com"),
//!     ("GMAIL_APP_PASSWORD", "abcd efgh ijkl mnop"),
//!     ("RECIPIENT", "me@example.com"),
//! ]);
//!
//! let settings = Settings::from_lookup(|key| env.get(key).map(|v| (*v).to_string())).unwrap();
//! assert_eq!(settings.devices[0].name, "Device 1");
//! assert_eq!(settings.polling_interval.as_secs(), 60);
//! ```

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Required variables, in the order they are reported when missing.
pub const REQUIRED_VARS: [&str; 4] = [
    "BITAXE_1_IP",
    "GMAIL_USER",
    "GMAIL_APP_PASSWORD",
    "RECIPIENT",
];

/// Gmail submission host.
pub const SMTP_HOST: &str = "smtp.gmail.com";

/// STARTTLS submission port.
pub const SMTP_PORT: u16 = 587;

/// Polling interval used when none is configured.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(60);

/// A monitored device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Network address, optionally with a port (`192.168.1.50`, `miner.lan:8080`).
    pub address: String,
    /// Name used in logs and emails.
    pub name: String,
}

impl DeviceConfig {
    /// Creates a device configuration.
    #[must_use]
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }
}

/// Which transitions produce an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationToggles {
    /// Notify when overheat mode turns on.
    pub overheat: bool,
    /// Notify on a new all-time best difficulty.
    pub best_difficulty: bool,
    /// Notify on a new best session difficulty.
    pub best_session_difficulty: bool,
}

impl Default for NotificationToggles {
    fn default() -> Self {
        Self {
            overheat: true,
            best_difficulty: true,
            best_session_difficulty: true,
        }
    }
}

/// SMTP submission settings.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// SMTP relay host.
    pub host: String,
    /// SMTP relay port.
    pub port: u16,
    /// Login user, also used as the sender address.
    pub username: String,
    /// App password.
    pub password: String,
    /// Address every notification is sent to.
    pub recipient: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Complete, validated settings. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Devices in configured order.
    pub devices: Vec<DeviceConfig>,
    /// Email delivery settings.
    pub smtp: SmtpConfig,
    /// Time between two polls of all devices.
    pub polling_interval: Duration,
    /// Notification categories.
    pub toggles: NotificationToggles,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if required variables are missing or an
    /// optional one cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingConfigFile`] if none of the required
    /// variables are set, [`ConfigError::MissingVariables`] if only some are,
    /// and [`ConfigError::InvalidValue`] for unparseable optional values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|&&key| get(key).is_none())
            .map(|key| (*key).to_string())
            .collect();
        if missing.len() == REQUIRED_VARS.len() {
            return Err(ConfigError::MissingConfigFile);
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        let required = |key: &str| {
            get(key).ok_or_else(|| ConfigError::MissingVariables(vec![key.to_string()]))
        };

        let polling_interval = match get("POLLING_INTERVAL_SECONDS") {
            Some(raw) => parse_interval("POLLING_INTERVAL_SECONDS", &raw)?,
            None => DEFAULT_POLLING_INTERVAL,
        };

        let toggles = NotificationToggles {
            overheat: parse_toggle("NOTIFY_ON_OVERHEAT", get("NOTIFY_ON_OVERHEAT"))?,
            best_difficulty: parse_toggle(
                "NOTIFY_ON_NEW_BEST_DIFFICULTY",
                get("NOTIFY_ON_NEW_BEST_DIFFICULTY"),
            )?,
            best_session_difficulty: parse_toggle(
                "NOTIFY_ON_NEW_BEST_SESSION_DIFFICULTY",
                get("NOTIFY_ON_NEW_BEST_SESSION_DIFFICULTY"),
            )?,
        };

        Ok(Self {
            devices: discover_devices(&get),
            smtp: SmtpConfig {
                host: SMTP_HOST.to_string(),
                port: SMTP_PORT,
                username: required("GMAIL_USER")?,
                password: required("GMAIL_APP_PASSWORD")?,
                recipient: required("RECIPIENT")?,
            },
            polling_interval,
            toggles,
        })
    }
}

/// Collects `BITAXE_{N}_IP` for N = 1, 2, ... up to the first gap.
fn discover_devices<F>(get: &F) -> Vec<DeviceConfig>
where
    F: Fn(&str) -> Option<String>,
{
    (1_usize..)
        .map_while(|index| {
            get(&format!("BITAXE_{index}_IP")).map(|address| {
                let name = get(&format!("BITAXE_{index}_NAME"))
                    .unwrap_or_else(|| format!("Device {index}"));
                DeviceConfig::new(address, name)
            })
        })
        .collect()
}

fn parse_interval(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            expected: "a positive number of seconds",
        }),
    }
}

fn parse_toggle(key: &str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(true);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
            expected: "true or false",
        }),
    }
}
