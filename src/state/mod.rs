// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! [`DeviceState`] holds what was last recorded for a device,
//! [`StateChange`] the transitions detected against a new snapshot, and
//! [`StateStore`] the state of every monitored device.

mod device_state;
mod state_change;
mod store;

pub use device_state::{DeviceState, UNSET_SESSION_DIFFICULTY};
pub use state_change::{Notification, StateChange};
pub use store::StateStore;
