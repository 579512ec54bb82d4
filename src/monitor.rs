// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poll loop coordinating devices, state and notifications.
//!
//! The monitor runs in two phases:
//!
//! 1. [`Monitor::initialize`] polls every device once and seeds the
//!    [`StateStore`]. Any unreachable device aborts startup.
//! 2. [`Monitor::run`] sleeps for the polling interval, then runs one
//!    [`tick`](Monitor::tick) over all devices, forever.
//!
//! Devices are polled one after another; nothing runs concurrently.
//!
//! # Examples
//!
//! ```no_run
//! use bitaxe_notifier::config::Settings;
//! use bitaxe_notifier::monitor::Monitor;
//! use bitaxe_notifier::notifier::EmailNotifier;
//! use bitaxe_notifier::protocol::DeviceClient;
//!
//! # async fn example() -> bitaxe_notifier::Result<()> {
//! let settings = Settings::from_env()?;
//! let notifier = EmailNotifier::new(settings.smtp.clone());
//! let monitor = Monitor::new(&settings, DeviceClient::new()?, notifier);
//!
//! let mut store = monitor.initialize().await?;
//! monitor.run(&mut store).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use crate::config::{DeviceConfig, NotificationToggles, Settings};
use crate::error::{Error, Result};
use crate::notifier::Notifier;
use crate::protocol::StatusSource;
use crate::state::{DeviceState, StateStore};

/// Watches a fixed set of devices.
#[derive(Debug)]
pub struct Monitor<S, N> {
    devices: Vec<DeviceConfig>,
    toggles: NotificationToggles,
    interval: Duration,
    source: S,
    notifier: N,
}

impl<S, N> Monitor<S, N>
where
    S: StatusSource,
    N: Notifier,
{
    /// Creates a monitor for the devices and options in `settings`.
    #[must_use]
    pub fn new(settings: &Settings, source: S, notifier: N) -> Self {
        Self {
            devices: settings.devices.clone(),
            toggles: settings.toggles,
            interval: settings.polling_interval,
            source,
            notifier,
        }
    }

    /// Returns the monitored devices, in polling order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceConfig] {
        &self.devices
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the notifier.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Polls every device once and records its initial state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceUnreachable`] for the first device that does
    /// not answer; the remaining devices are not polled.
    pub async fn initialize(&self) -> Result<StateStore> {
        tracing::info!("Monitoring {} device(s)", self.devices.len());

        let mut store = StateStore::new();
        for device in &self.devices {
            let Some(snapshot) = self.source.fetch_status(&device.address).await else {
                tracing::error!(
                    "Failed to get initial system info for {}. Exiting.",
                    device.name
                );
                return Err(Error::DeviceUnreachable {
                    name: device.name.clone(),
                });
            };

            tracing::info!(
                "{} - Initial best difficulty: {}",
                device.name,
                snapshot.best_diff
            );
            tracing::info!(
                "{} - Initial best session difficulty: {}",
                device.name,
                snapshot.best_session_diff
            );

            store.insert(device.address.clone(), DeviceState::from(snapshot));
        }

        Ok(store)
    }

    /// Polls every device once and handles the transitions found.
    ///
    /// An unreachable device is skipped with a warning and keeps its state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDevice`] if a device has no entry in `store`.
    pub async fn tick(&self, store: &mut StateStore) -> Result<()> {
        for device in &self.devices {
            let Some(snapshot) = self.source.fetch_status(&device.address).await else {
                tracing::warn!(
                    "Failed to get system info for {}, will retry next interval.",
                    device.name
                );
                continue;
            };

            let state = store
                .get_mut(&device.address)
                .ok_or_else(|| Error::UnknownDevice(device.address.clone()))?;

            for change in state.changes(&snapshot, &self.toggles) {
                change.log(&device.name);
                if let Some(email) = change.notification(&device.name) {
                    self.notifier.notify(&email.subject, &email.body).await;
                }
                state.apply(&change);
            }
        }

        Ok(())
    }

    /// Runs ticks forever, sleeping for the polling interval before each one.
    ///
    /// The first tick happens one full interval after the call.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`tick`](Self::tick).
    pub async fn run(&self, store: &mut StateStore) -> Result<()> {
        loop {
            tokio::time::sleep(self.interval).await;
            self.tick(store).await?;
        }
    }
}
