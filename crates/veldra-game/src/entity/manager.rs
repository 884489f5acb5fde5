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

//! The slot-based entity table.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use veldra_core::EntityHandle;

use crate::entity::Entity;

/// The central handle-indexed entity table.
///
/// Owns every live entity. `add` reuses the lowest free slot, `remove`
/// marks a slot free without shrinking, and lookups are always bounds- and
/// liveness-checked. Slot reuse means a handle saved across a removal can
/// alias a different, later entity; callers re-validate through [`get`]
/// after any removal.
///
/// Removing the slot currently being visited while iterating is the one
/// documented hazard; destructive passes snapshot [`handles`] first.
///
/// [`get`]: EntityManager::get
/// [`handles`]: EntityManager::handles
#[derive(Debug, Default)]
pub struct EntityManager {
    slots: Vec<Option<Entity>>,
    free: BinaryHeap<Reverse<u32>>,
}

impl EntityManager {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entity`, assigning it the lowest free slot.
    ///
    /// Grows the backing storage when no slot is free; never fails.
    pub fn add(&mut self, mut entity: Entity) -> EntityHandle {
        let handle = match self.free.pop() {
            Some(Reverse(index)) => EntityHandle::new(index),
            None => {
                self.slots.push(None);
                EntityHandle::new((self.slots.len() - 1) as u32)
            }
        };
        entity.set_handle(handle);
        self.slots[handle.index()] = Some(entity);
        handle
    }

    /// Looks up a live entity.
    ///
    /// Returns `None` for freed or never-allocated slots.
    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    /// Looks up a live entity mutably.
    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.slots.get_mut(handle.index()).and_then(Option::as_mut)
    }

    /// Removes and returns the entity at `handle`, freeing the slot.
    ///
    /// Runs no teardown logic; the caller drives the entity's lifetime.
    pub fn remove(&mut self, handle: EntityHandle) -> Option<Entity> {
        let entity = self.detach(handle)?;
        self.release_slot(handle);
        Some(entity)
    }

    /// Takes the entity out of its slot while keeping the slot reserved.
    ///
    /// Lookups return `None` for a detached slot but the slot is not
    /// reused until [`release_slot`] is called. This is how the destroy
    /// path keeps "slot release" strictly after reference cleanup.
    ///
    /// [`release_slot`]: EntityManager::release_slot
    pub(crate) fn detach(&mut self, handle: EntityHandle) -> Option<Entity> {
        self.slots.get_mut(handle.index()).and_then(Option::take)
    }

    /// Frees a slot previously emptied by [`detach`].
    ///
    /// [`detach`]: EntityManager::detach
    pub(crate) fn release_slot(&mut self, handle: EntityHandle) {
        debug_assert!(
            self.slots
                .get(handle.index())
                .is_some_and(Option::is_none),
            "released slot must exist and be empty"
        );
        self.free.push(Reverse(handle.index() as u32));
    }

    /// Iterates over every live entity in slot order.
    ///
    /// Insertions made mid-iteration are not guaranteed to be produced.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Iterates mutably over every live entity in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Snapshot of every live handle, for passes that remove entities
    /// while walking the table.
    pub fn handles(&self) -> Vec<EntityHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| EntityHandle::new(index as u32))
            .collect()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether the table holds no live entities.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of slots ever allocated, free or live.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str) -> Entity {
        Entity::new(name, 1)
    }

    #[test]
    fn add_assigns_sequential_slots() {
        let mut table = EntityManager::new();
        let a = table.add(entity("a"));
        let b = table.add(entity("b"));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn get_after_remove_is_none() {
        let mut table = EntityManager::new();
        let a = table.add(entity("a"));
        let b = table.add(entity("b"));
        assert!(table.remove(a).is_some());
        assert!(table.get(a).is_none());
        // The other entity is untouched and no aliasing occurs.
        assert_eq!(table.get(b).unwrap().id().class_name(), "b");
    }

    #[test]
    fn add_reuses_the_lowest_free_slot() {
        let mut table = EntityManager::new();
        let a = table.add(entity("a"));
        let b = table.add(entity("b"));
        let c = table.add(entity("c"));
        table.remove(c);
        table.remove(a);

        let d = table.add(entity("d"));
        assert_eq!(d.index(), a.index());
        let e = table.add(entity("e"));
        assert_eq!(e.index(), c.index());
        let f = table.add(entity("f"));
        assert_eq!(f.index(), 3);
        assert_eq!(table.get(b).unwrap().id().class_name(), "b");
    }

    #[test]
    fn get_for_never_allocated_slot_is_none() {
        let table = EntityManager::new();
        assert!(table.get(EntityHandle::new(123)).is_none());
    }

    #[test]
    fn detach_reserves_the_slot_until_release() {
        let mut table = EntityManager::new();
        let a = table.add(entity("a"));
        let detached = table.detach(a).unwrap();
        assert!(table.get(a).is_none());

        // The reserved slot must not be handed out again.
        let b = table.add(entity("b"));
        assert_ne!(b.index(), a.index());

        table.release_slot(a);
        let c = table.add(entity("c"));
        assert_eq!(c.index(), a.index());
        assert_eq!(detached.id().class_name(), "a");
    }

    #[test]
    fn iteration_follows_slot_order_and_skips_free_slots() {
        let mut table = EntityManager::new();
        table.add(entity("a"));
        let b = table.add(entity("b"));
        table.add(entity("c"));
        table.remove(b);

        let names: Vec<_> = table
            .iter()
            .map(|e| e.id().class_name().to_owned())
            .collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(table.capacity(), 3);
    }

    #[test]
    fn entities_learn_their_handle_on_add() {
        let mut table = EntityManager::new();
        let a = table.add(entity("a"));
        assert_eq!(table.get(a).unwrap().handle(), a);
    }
}
