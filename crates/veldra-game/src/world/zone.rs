// Copyright 2025 veldra contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The active-processing zone set.
//!
//! Entities near the player get full per-frame treatment (AI, physics,
//! scripts); the zone set tracks which ones. Membership is rebuilt as the
//! player moves, and cleared for an entity when it is destroyed.

use veldra_core::EntityHandle;

/// The set of entities currently receiving full per-frame processing.
#[derive(Debug, Default)]
pub struct TreatZone {
    active: Vec<EntityHandle>,
}

impl TreatZone {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entity` to the set. A no-op when already present.
    pub fn insert(&mut self, entity: EntityHandle) {
        if !self.active.contains(&entity) {
            self.active.push(entity);
        }
    }

    /// Removes `entity` from the set. A no-op when absent.
    pub fn remove(&mut self, entity: EntityHandle) {
        self.active.retain(|&member| member != entity);
    }

    /// Whether `entity` is in the set.
    pub fn contains(&self, entity: EntityHandle) -> bool {
        self.active.contains(&entity)
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.active.iter().copied()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Empties the set, e.g. on level change.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_deduplicated_and_remove_is_idempotent() {
        let mut zone = TreatZone::new();
        let a = EntityHandle::new(1);
        zone.insert(a);
        zone.insert(a);
        assert_eq!(zone.len(), 1);

        zone.remove(a);
        zone.remove(a);
        assert!(zone.is_empty());
        assert!(!zone.contains(a));
    }
}
