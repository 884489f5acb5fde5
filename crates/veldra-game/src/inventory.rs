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

//! Container slots holding entity handles.
//!
//! Slot-placement rules (grids, stacking into partially filled slots) are
//! a collaborator concern; the core only needs membership: which container
//! holds an item, and how to take it out again during cleanup.

use veldra_core::EntityHandle;

/// A container of entity handles with a fixed number of slots.
///
/// Owned by the entity that carries it. Holding an item here does not
/// keep the item alive; the handle is re-validated on every access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<Option<EntityHandle>>,
}

impl Inventory {
    /// Creates an inventory with `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Puts `item` into the first free slot.
    ///
    /// Fails when the inventory is full or already holds `item`.
    pub fn insert(&mut self, item: EntityHandle) -> bool {
        if self.contains(item) {
            return false;
        }
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(item);
                true
            }
            None => false,
        }
    }

    /// Takes `item` out of its slot. Returns whether it was held.
    pub fn remove(&mut self, item: EntityHandle) -> bool {
        for slot in &mut self.slots {
            if *slot == Some(item) {
                *slot = None;
                return true;
            }
        }
        false
    }

    /// Whether `item` is held by this inventory.
    pub fn contains(&self, item: EntityHandle) -> bool {
        self.slots.contains(&Some(item))
    }

    /// The held items, in slot order.
    pub fn items(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Number of held items.
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of slots, free or occupied.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether no items are held.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_fills_the_first_free_slot() {
        let mut inventory = Inventory::new(2);
        let a = EntityHandle::new(10);
        let b = EntityHandle::new(11);
        assert!(inventory.insert(a));
        assert!(inventory.insert(b));
        assert!(!inventory.insert(EntityHandle::new(12)), "full");
        assert_eq!(inventory.count(), 2);

        inventory.remove(a);
        let c = EntityHandle::new(12);
        assert!(inventory.insert(c));
        assert_eq!(inventory.items().collect::<Vec<_>>(), vec![c, b]);
    }

    #[test]
    fn double_insert_is_rejected() {
        let mut inventory = Inventory::new(3);
        let a = EntityHandle::new(10);
        assert!(inventory.insert(a));
        assert!(!inventory.insert(a));
        assert_eq!(inventory.count(), 1);
    }

    #[test]
    fn remove_of_absent_item_is_a_no_op() {
        let mut inventory = Inventory::new(1);
        assert!(!inventory.remove(EntityHandle::new(5)));
    }
}
