// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification delivery.
//!
//! The monitor talks to a [`Notifier`]; [`EmailNotifier`] is the production
//! implementation. Delivery is fire-and-forget: failures are logged by the
//! notifier and never reach the caller.

mod email;

pub use email::{EmailNotifier, is_auth_failure};

/// Something that can deliver a notification.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Delivers a notification with the given subject and body.
    async fn notify(&self, subject: &str, body: &str);
}
