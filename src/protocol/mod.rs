// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device communication.
//!
//! [`DeviceClient`] polls the HTTP status API. The monitor only depends on
//! the [`StatusSource`] trait so it can be driven without a network.

mod http;

pub use http::{DeviceClient, SYSTEM_INFO_PATH};

use crate::response::StatusSnapshot;

/// Source of device status snapshots.
#[allow(async_fn_in_trait)]
pub trait StatusSource {
    /// Fetches the current status of the device at `address`.
    ///
    /// Returns `None` if the device cannot be reached or answers with
    /// something unusable. Implementations log the reason; they never fail.
    async fn fetch_status(&self, address: &str) -> Option<StatusSnapshot>;
}
