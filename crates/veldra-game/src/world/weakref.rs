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

//! The registry of named single-slot entity back-references.
//!
//! Subsystems that track "the entity currently being X" (dragged, combined,
//! stolen from, ...) register that fact here instead of keeping their own
//! pointer, so the cleanup protocol can query and clear every slot
//! generically.

use veldra_core::EntityHandle;

/// A named single-entity back-reference slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeakRefSlot {
    /// The entity currently being dragged by the cursor.
    Dragged,
    /// The entity the cursor is hovering over.
    FlyingOver,
    /// The entity selected as the combine source.
    CombineTarget,
    /// The weapon entity a pending weapon-change will equip.
    WeaponChange,
    /// The entity currently being stolen from.
    StealTarget,
    /// The entity whose secondary inventory is open on screen.
    SecondaryInventoryOwner,
    /// The camera entity currently driving the view. An empty slot means
    /// the engine's built-in player camera is active.
    ActiveCamera,
}

impl WeakRefSlot {
    /// Every slot, in clearing order.
    pub const ALL: [Self; 7] = [
        Self::Dragged,
        Self::FlyingOver,
        Self::CombineTarget,
        Self::WeaponChange,
        Self::StealTarget,
        Self::SecondaryInventoryOwner,
        Self::ActiveCamera,
    ];

    /// A stable name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dragged => "dragged",
            Self::FlyingOver => "flying_over",
            Self::CombineTarget => "combine_target",
            Self::WeaponChange => "weapon_change",
            Self::StealTarget => "steal_target",
            Self::SecondaryInventoryOwner => "secondary_inventory_owner",
            Self::ActiveCamera => "active_camera",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Dragged => 0,
            Self::FlyingOver => 1,
            Self::CombineTarget => 2,
            Self::WeaponChange => 3,
            Self::StealTarget => 4,
            Self::SecondaryInventoryOwner => 5,
            Self::ActiveCamera => 6,
        }
    }
}

/// The table of all named weak-reference slots.
///
/// Slots hold handles, never entity borrows; a reader re-validates the
/// handle through the entity table before use.
#[derive(Debug, Default)]
pub struct WeakRefTable {
    slots: [Option<EntityHandle>; WeakRefSlot::ALL.len()],
}

impl WeakRefTable {
    /// Creates a table with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a slot.
    pub fn get(&self, slot: WeakRefSlot) -> Option<EntityHandle> {
        self.slots[slot.index()]
    }

    /// Writes a slot.
    pub fn set(&mut self, slot: WeakRefSlot, entity: Option<EntityHandle>) {
        self.slots[slot.index()] = entity;
    }

    /// Clears `slot` if it currently equals `entity`.
    pub fn clear_if(&mut self, slot: WeakRefSlot, entity: EntityHandle) -> bool {
        if self.slots[slot.index()] == Some(entity) {
            self.slots[slot.index()] = None;
            true
        } else {
            false
        }
    }

    /// Clears every slot equal to `entity`, returning how many were
    /// cleared. Idempotent.
    pub fn clear_all(&mut self, entity: EntityHandle) -> usize {
        let mut cleared = 0;
        for slot in WeakRefSlot::ALL {
            if self.clear_if(slot, entity) {
                log::trace!("cleared weak ref '{}' to {entity}", slot.name());
                cleared += 1;
            }
        }
        cleared
    }

    /// Iterates every slot with its current value.
    pub fn iter(&self) -> impl Iterator<Item = (WeakRefSlot, Option<EntityHandle>)> + '_ {
        WeakRefSlot::ALL
            .into_iter()
            .map(move |slot| (slot, self.slots[slot.index()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_all_hits_every_matching_slot() {
        let mut table = WeakRefTable::new();
        let a = EntityHandle::new(3);
        let b = EntityHandle::new(4);
        table.set(WeakRefSlot::Dragged, Some(a));
        table.set(WeakRefSlot::CombineTarget, Some(a));
        table.set(WeakRefSlot::StealTarget, Some(b));

        assert_eq!(table.clear_all(a), 2);
        assert_eq!(table.get(WeakRefSlot::Dragged), None);
        assert_eq!(table.get(WeakRefSlot::CombineTarget), None);
        assert_eq!(table.get(WeakRefSlot::StealTarget), Some(b));

        // Clearing again finds nothing.
        assert_eq!(table.clear_all(a), 0);
    }

    #[test]
    fn clear_if_leaves_other_entities_alone() {
        let mut table = WeakRefTable::new();
        let a = EntityHandle::new(1);
        table.set(WeakRefSlot::ActiveCamera, Some(a));
        assert!(!table.clear_if(WeakRefSlot::ActiveCamera, EntityHandle::new(2)));
        assert_eq!(table.get(WeakRefSlot::ActiveCamera), Some(a));
        assert!(table.clear_if(WeakRefSlot::ActiveCamera, a));
    }
}
