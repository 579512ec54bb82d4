// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state store.

use std::collections::HashMap;

use super::DeviceState;

/// Last known state of every monitored device, keyed by device address.
///
/// Filled once during startup; afterwards entries are only updated in place.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    states: HashMap<String, DeviceState>,
}

impl StateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the initial state of a device.
    pub fn insert(&mut self, address: impl Into<String>, state: DeviceState) {
        self.states.insert(address.into(), state);
    }

    /// Returns the state of a device.
    #[must_use]
    pub fn get(&self, address: &str) -> Option<&DeviceState> {
        self.states.get(address)
    }

    /// Returns the state of a device for updating.
    pub fn get_mut(&mut self, address: &str) -> Option<&mut DeviceState> {
        self.states.get_mut(address)
    }

    /// Returns the number of tracked devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no device is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::StatusSnapshot;

    #[test]
    fn insert_and_update_in_place() {
        let mut store = StateStore::new();
        assert!(store.is_empty());

        store.insert(
            "10.0.0.2",
            DeviceState::from(StatusSnapshot::new(false, "1", "1")),
        );
        assert_eq!(store.len(), 1);

        let state = store.get_mut("10.0.0.2").unwrap();
        state.apply(&crate::state::StateChange::OverheatActivated);

        assert!(store.get("10.0.0.2").unwrap().overheat_mode());
        assert!(store.get("10.0.0.3").is_none());
    }
}
