// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device state tracking.

use crate::config::NotificationToggles;
use crate::response::StatusSnapshot;

use super::StateChange;

/// Best session difficulty reported by a device that has not found a share
/// since boot.
pub const UNSET_SESSION_DIFFICULTY: &str = "0";

/// Last known state of a device.
///
/// Seeded from the first snapshot and only updated when a recognized
/// transition is applied, so it can lag behind the device when a
/// notification category is disabled.
///
/// # Examples
///
/// ```
/// use bitaxe_notifier::config::NotificationToggles;
/// use bitaxe_notifier::response::StatusSnapshot;
/// use bitaxe_notifier::state::{DeviceState, StateChange};
///
/// let mut state = DeviceState::from(StatusSnapshot::new(false, "100", "50"));
/// let changes = state.changes(
///     &StatusSnapshot::new(true, "100", "50"),
///     &NotificationToggles::default(),
/// );
/// assert_eq!(changes, vec![StateChange::OverheatActivated]);
///
/// for change in &changes {
///     state.apply(change);
/// }
/// assert!(state.overheat_mode());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    overheat_mode: bool,
    best_diff: String,
    best_session_diff: String,
}

impl From<StatusSnapshot> for DeviceState {
    fn from(snapshot: StatusSnapshot) -> Self {
        Self {
            overheat_mode: snapshot.overheat_mode,
            best_diff: snapshot.best_diff,
            best_session_diff: snapshot.best_session_diff,
        }
    }
}

impl DeviceState {
    /// Returns whether overheat mode is recorded as active.
    #[must_use]
    pub fn overheat_mode(&self) -> bool {
        self.overheat_mode
    }

    /// Returns the recorded all-time best difficulty.
    #[must_use]
    pub fn best_diff(&self) -> &str {
        &self.best_diff
    }

    /// Returns the recorded best session difficulty.
    #[must_use]
    pub fn best_session_diff(&self) -> &str {
        &self.best_session_diff
    }

    /// Compares a fresh snapshot with this state.
    ///
    /// Yields at most one overheat change followed by at most one difficulty
    /// change. A new all-time best takes precedence over a new session best
    /// in the same tick; the session best is then picked up on a later tick.
    #[must_use]
    pub fn changes(
        &self,
        snapshot: &StatusSnapshot,
        toggles: &NotificationToggles,
    ) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if snapshot.overheat_mode && !self.overheat_mode && toggles.overheat {
            changes.push(StateChange::OverheatActivated);
        } else if !snapshot.overheat_mode && self.overheat_mode {
            changes.push(StateChange::OverheatCleared);
        }

        if snapshot.best_diff != self.best_diff && toggles.best_difficulty {
            changes.push(StateChange::BestDifficulty(snapshot.best_diff.clone()));
        } else if snapshot.best_session_diff != self.best_session_diff
            && snapshot.best_session_diff != UNSET_SESSION_DIFFICULTY
            && toggles.best_session_difficulty
        {
            changes.push(StateChange::BestSessionDifficulty(
                snapshot.best_session_diff.clone(),
            ));
        }

        changes
    }

    /// Applies a change.
    ///
    /// Returns `true` if the state was modified.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::OverheatActivated => replace(&mut self.overheat_mode, true),
            StateChange::OverheatCleared => replace(&mut self.overheat_mode, false),
            StateChange::BestDifficulty(diff) => replace(&mut self.best_diff, diff.clone()),
            StateChange::BestSessionDifficulty(diff) => {
                replace(&mut self.best_session_diff, diff.clone())
            }
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(overheat: bool, best: &str, session: &str) -> DeviceState {
        DeviceState::from(StatusSnapshot::new(overheat, best, session))
    }

    fn all_on() -> NotificationToggles {
        NotificationToggles::default()
    }

    #[test]
    fn no_changes_for_identical_snapshot() {
        let s = state(false, "100", "50");
        assert!(s.changes(&StatusSnapshot::new(false, "100", "50"), &all_on()).is_empty());
    }

    #[test]
    fn overheat_onset_detected_once() {
        let mut s = state(false, "100", "50");
        let hot = StatusSnapshot::new(true, "100", "50");

        let changes = s.changes(&hot, &all_on());
        assert_eq!(changes, vec![StateChange::OverheatActivated]);
        assert!(s.apply(&changes[0]));
        assert!(s.overheat_mode());

        assert!(s.changes(&hot, &all_on()).is_empty());
    }

    #[test]
    fn overheat_recovery_ignores_toggle() {
        let s = state(true, "100", "50");
        let toggles = NotificationToggles {
            overheat: false,
            ..all_on()
        };
        assert_eq!(
            s.changes(&StatusSnapshot::new(false, "100", "50"), &toggles),
            vec![StateChange::OverheatCleared]
        );
    }

    #[test]
    fn overheat_onset_suppressed_by_toggle() {
        let s = state(false, "100", "50");
        let toggles = NotificationToggles {
            overheat: false,
            ..all_on()
        };
        assert!(s.changes(&StatusSnapshot::new(true, "100", "50"), &toggles).is_empty());
    }

    #[test]
    fn best_difficulty_wins_over_session() {
        let s = state(false, "100", "50");
        let changes = s.changes(&StatusSnapshot::new(false, "200", "75"), &all_on());
        assert_eq!(changes, vec![StateChange::BestDifficulty("200".to_string())]);
    }

    #[test]
    fn session_reported_when_best_toggle_disabled() {
        let s = state(false, "100", "50");
        let toggles = NotificationToggles {
            best_difficulty: false,
            ..all_on()
        };
        let changes = s.changes(&StatusSnapshot::new(false, "200", "75"), &toggles);
        assert_eq!(changes, vec![StateChange::BestSessionDifficulty("75".to_string())]);
    }

    #[test]
    fn session_reset_to_zero_ignored() {
        let s = state(false, "100", "50");
        assert!(s.changes(&StatusSnapshot::new(false, "100", "0"), &all_on()).is_empty());
    }

    #[test]
    fn overheat_and_difficulty_in_same_tick() {
        let s = state(false, "100", "50");
        let changes = s.changes(&StatusSnapshot::new(true, "100", "60"), &all_on());
        assert_eq!(
            changes,
            vec![
                StateChange::OverheatActivated,
                StateChange::BestSessionDifficulty("60".to_string()),
            ]
        );
    }

    #[test]
    fn apply_updates_only_targeted_field() {
        let mut s = state(false, "100", "50");
        assert!(s.apply(&StateChange::BestDifficulty("200".to_string())));
        assert_eq!(s.best_diff(), "200");
        assert_eq!(s.best_session_diff(), "50");
        assert!(!s.apply(&StateChange::BestDifficulty("200".to_string())));
    }
}
