// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A [`StateChange`] is one recognized transition between the stored state
//! of a device and a fresh snapshot. Changes are applied to a
//! [`DeviceState`](super::DeviceState) and most of them carry an email.
//!
//! # Examples
//!
//! ```
//! use bitaxe_notifier::state::{DeviceState, StateChange};
//! use bitaxe_notifier::response::StatusSnapshot;
//!
//! let mut state = DeviceState::from(StatusSnapshot::new(false, "100", "50"));
//!
//! // Apply returns true if state actually changed
//! assert!(state.apply(&StateChange::OverheatActivated));
//! assert!(!state.apply(&StateChange::OverheatActivated));
//! ```

/// A transition detected for one device during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// Overheat mode turned on.
    OverheatActivated,

    /// Overheat mode turned off.
    OverheatCleared,

    /// A new all-time best difficulty.
    BestDifficulty(String),

    /// A new best difficulty since the last reboot.
    BestSessionDifficulty(String),
}

/// Subject and body of a notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Email subject.
    pub subject: String,
    /// Plain-text email body.
    pub body: String,
}

impl StateChange {
    /// Returns the email for this change, if it sends one.
    ///
    /// Recovering from overheat is only logged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitaxe_notifier::state::StateChange;
    ///
    /// let email = StateChange::OverheatActivated.notification("Garage").unwrap();
    /// assert_eq!(email.subject, "Garage Overheated");
    /// assert!(StateChange::OverheatCleared.notification("Garage").is_none());
    /// ```
    #[must_use]
    pub fn notification(&self, name: &str) -> Option<Notification> {
        let (subject, body) = match self {
            Self::OverheatActivated => (
                format!("{name} Overheated"),
                format!("Overheat mode is active on {name}."),
            ),
            Self::OverheatCleared => return None,
            Self::BestDifficulty(diff) => (
                "New Best Difficulty".to_string(),
                format!("{name} achieved {diff} all-time best"),
            ),
            Self::BestSessionDifficulty(diff) => (
                "New Best Session Difficulty".to_string(),
                format!("{name} achieved {diff} since system boot"),
            ),
        };
        Some(Notification { subject, body })
    }

    /// Logs the change for the named device.
    pub fn log(&self, name: &str) {
        match self {
            Self::OverheatActivated => tracing::warn!("{name} - Overheat mode activated."),
            Self::OverheatCleared => tracing::info!("{name} - Overheat mode deactivated."),
            Self::BestDifficulty(diff) => tracing::info!("{name} - New best difficulty: {diff}"),
            Self::BestSessionDifficulty(diff) => {
                tracing::info!("{name} - New best session difficulty: {diff}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overheat_email() {
        let email = StateChange::OverheatActivated.notification("Garage").unwrap();
        assert_eq!(email.subject, "Garage Overheated");
        assert_eq!(email.body, "Overheat mode is active on Garage.");
    }

    #[test]
    fn overheat_cleared_sends_nothing() {
        assert!(StateChange::OverheatCleared.notification("Garage").is_none());
    }

    #[test]
    fn best_difficulty_email() {
        let email = StateChange::BestDifficulty("4.29G".to_string())
            .notification("Garage")
            .unwrap();
        assert_eq!(email.subject, "New Best Difficulty");
        assert_eq!(email.body, "Garage achieved 4.29G all-time best");
    }

    #[test]
    fn best_session_difficulty_email() {
        let email = StateChange::BestSessionDifficulty("12.5M".to_string())
            .notification("Office")
            .unwrap();
        assert_eq!(email.subject, "New Best Session Difficulty");
        assert_eq!(email.body, "Office achieved 12.5M since system boot");
    }
}
