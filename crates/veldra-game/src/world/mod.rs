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

//! The world aggregate: the entity table plus every subsystem registry the
//! reference-cleanup protocol touches on entity destruction.
//!
//! Everything runs on one logical simulation thread between frames. Within
//! one teardown, reference cleanup strictly precedes variant-payload
//! release, which strictly precedes handle-slot release; the slot is
//! reserved (lookups return `None`) for the whole teardown so no other
//! subsystem can reach a half-destroyed entity through its handle.

mod animation;
mod lights;
mod savegame;
mod sounds;
mod speech;
mod spells;
mod timers;
mod weakref;
mod zone;

pub use animation::{AnimHandle, AnimationManager};
pub use lights::{Light, LightHandle, LightRegistry};
pub use savegame::SavedGameLog;
pub use sounds::{SoundHandle, SoundRegistry};
pub use speech::{InfoOverlay, InfoOverlays, SpeechEntry, SpeechQueue};
pub use spells::{Spell, SpellHandle, SpellRegistry};
pub use timers::{ScriptTimer, TimerRegistry};
pub use weakref::{WeakRefSlot, WeakRefTable};
pub use zone::TreatZone;

use veldra_core::math::Vec3;
use veldra_core::{EntityHandle, EntityInstance};
use veldra_scene::GroupHandle;

use crate::config::GameConfig;
use crate::entity::{Entity, EntityFlags, EntityKind, EntityManager, EntityState, ShowState};
use crate::inventory::Inventory;

/// The sample played while an entity burns.
const IGNITION_LOOP_SFX: &str = "sfx/fire_loop";

/// The simulation world.
///
/// Owns the entity table and every registry that can hold a reference to
/// an entity. All cross-subsystem references are [`EntityHandle`]s,
/// re-validated through [`World::entities`] on use.
#[derive(Debug, Default)]
pub struct World {
    /// The central handle-indexed entity table.
    pub entities: EntityManager,
    /// Gameplay tuning.
    pub config: GameConfig,
    /// Named single-slot entity back-references.
    pub weak_refs: WeakRefTable,
    /// The active-processing zone set.
    pub treat_zone: TreatZone,
    /// Queued speech.
    pub speech: SpeechQueue,
    /// Live info overlays.
    pub overlays: InfoOverlays,
    /// Script timers.
    pub timers: TimerRegistry,
    /// Active spells.
    pub spells: SpellRegistry,
    /// Dynamic lights.
    pub lights: LightRegistry,
    /// Sound sources.
    pub sounds: SoundRegistry,
    /// Shared animation resources.
    pub animations: AnimationManager,
    /// Destroy-time save bookkeeping.
    pub saved_game: SavedGameLog,
    deferred: Vec<EntityHandle>,
}

impl World {
    /// Creates an empty world with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty world with the given configuration.
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // --- Spawning ---

    /// Creates an entity with default state and no variant payload and
    /// registers it in the table.
    ///
    /// The caller populates the kind payload and flags through
    /// [`EntityManager::get_mut`] afterwards.
    pub fn spawn(&mut self, class_path: &str, instance: EntityInstance) -> EntityHandle {
        let entity = Entity::new(class_path, instance);
        log::debug!("spawning entity {}", entity.id());
        self.entities.add(entity)
    }

    // --- Simulation-state helpers ---

    /// Queues a script event for delivery to `entity`.
    ///
    /// Dropped without error when the entity is missing, script-frozen or
    /// pending removal; returns whether the event was queued.
    pub fn post_event(&mut self, entity: EntityHandle, event: &str) -> bool {
        match self.entities.get_mut(entity) {
            Some(record) if record.accepts_events() => {
                record.pending_events.push(event.to_owned());
                true
            }
            _ => false,
        }
    }

    /// Adds or removes `entity` from the active-processing zone set,
    /// keeping its zone flag in sync.
    pub fn set_in_treat_zone(&mut self, entity: EntityHandle, active: bool) {
        let Some(record) = self.entities.get_mut(entity) else {
            return;
        };
        if active {
            record.flags |= EntityFlags::IN_ACTIVE_ZONE;
            self.treat_zone.insert(entity);
        } else {
            record.flags.remove(EntityFlags::IN_ACTIVE_ZONE);
            self.treat_zone.remove(entity);
        }
    }

    /// Ignites `entity`, creating the burn light and looping sound it owns
    /// until extinguished or destroyed.
    pub fn ignite(&mut self, entity: EntityHandle) {
        let Some(record) = self.entities.get(entity) else {
            return;
        };
        let pos = record.pos;
        let light = self.lights.create(Light {
            pos,
            ..Light::default()
        });
        let sound = self.sounds.play_at(IGNITION_LOOP_SFX, pos);

        if let Some(record) = self.entities.get_mut(entity) {
            record.ignition = 1.0;
            record.ignition_light = Some(light);
            record.ignition_sound = Some(sound);
        }
    }

    /// Puts out a burning entity, destroying its burn light and sound.
    pub fn extinguish(&mut self, entity: EntityHandle) {
        let Some(record) = self.entities.get_mut(entity) else {
            return;
        };
        record.ignition = 0.0;
        self.lights.destroy(&mut record.ignition_light);
        self.sounds.stop(&mut record.ignition_sound);
    }

    /// Attaches `child`'s object to `parent`'s object at the given group
    /// and vertex. Fails when either entity or `parent`'s mutable object
    /// is missing.
    pub fn attach(
        &mut self,
        parent: EntityHandle,
        child: EntityHandle,
        group: GroupHandle,
        vertex: u32,
    ) -> bool {
        if self.entities.get(child).is_none() {
            return false;
        }
        match self.entities.get_mut(parent).and_then(Entity::object_mut) {
            Some(object) => {
                object.link_child(group, vertex, child);
                true
            }
            None => false,
        }
    }

    // --- Inventories ---

    /// Gives `owner` a fresh inventory with `capacity` slots, destroying
    /// any inventory it already had (scripted `inventory create`).
    pub fn create_inventory(&mut self, owner: EntityHandle, capacity: usize) {
        self.destroy_inventory(owner);
        if let Some(record) = self.entities.get_mut(owner) {
            record.inventory = Some(Inventory::new(capacity));
        }
    }

    /// Puts `item` into `owner`'s inventory.
    ///
    /// Fails when either entity is missing, `owner` has no inventory, or
    /// the inventory rejects the item.
    pub fn give_item(&mut self, owner: EntityHandle, item: EntityHandle) -> bool {
        if self.entities.get(item).is_none() {
            return false;
        }
        let inserted = self
            .entities
            .get_mut(owner)
            .and_then(|record| record.inventory.as_mut())
            .is_some_and(|inventory| inventory.insert(item));
        if inserted {
            if let Some(record) = self.entities.get_mut(item) {
                record.show = ShowState::InInventory;
            }
        }
        inserted
    }

    /// Removes `item` from whichever container currently holds it.
    /// Returns whether any container did.
    pub fn remove_from_inventories(&mut self, item: EntityHandle) -> bool {
        for record in self.entities.iter_mut() {
            if let Some(inventory) = &mut record.inventory {
                if inventory.remove(item) {
                    return true;
                }
            }
        }
        false
    }

    /// The container currently holding `item`, if any.
    pub fn find_container(&self, item: EntityHandle) -> Option<EntityHandle> {
        self.entities
            .iter()
            .find(|record| {
                record
                    .inventory
                    .as_ref()
                    .is_some_and(|inventory| inventory.contains(item))
            })
            .map(Entity::handle)
    }

    /// The world-space position of `item`: its own position, or the
    /// outermost container's position when it sits in an inventory chain.
    pub fn item_world_position(&self, item: EntityHandle) -> Vec3 {
        let mut pos = self
            .entities
            .get(item)
            .map(|record| record.pos)
            .unwrap_or(Vec3::ZERO);
        let mut current = item;
        while let Some(container) = self.find_container(current) {
            if let Some(record) = self.entities.get(container) {
                pos = record.pos;
            }
            current = container;
        }
        pos
    }

    /// Scripted `inventory destroy`: empties and drops `owner`'s
    /// inventory, deferred-destroying every contained item.
    ///
    /// Stack counts are forced to one first so the deferred teardown
    /// removes each item entirely.
    pub fn destroy_inventory(&mut self, owner: EntityHandle) {
        self.weak_refs
            .clear_if(WeakRefSlot::SecondaryInventoryOwner, owner);

        let Some(inventory) = self
            .entities
            .get_mut(owner)
            .and_then(|record| record.inventory.take())
        else {
            return;
        };

        for item in inventory.items().collect::<Vec<_>>() {
            if let Some(record) = self.entities.get_mut(item) {
                if let EntityKind::Item(data) = &mut record.kind {
                    data.count = 1;
                }
            }
            self.request_deferred_destroy(item);
        }
    }

    // --- Deferred destruction ---

    /// Flags `entity` for teardown at the next safe point.
    ///
    /// This is the only place the mega-hidden/freeze-script pair is set;
    /// once flagged, [`Entity::accepts_events`] is false and no further
    /// script events reach the entity. Returns whether the entity exists.
    pub fn request_deferred_destroy(&mut self, entity: EntityHandle) -> bool {
        let Some(record) = self.entities.get_mut(entity) else {
            return false;
        };
        record.state = EntityState::PendingRemoval;
        record.show = ShowState::MegaHidden;
        record.flags |= EntityFlags::FREEZE_SCRIPT;
        if !self.deferred.contains(&entity) {
            self.deferred.push(entity);
        }
        true
    }

    /// Unregisters a pending deferred destroy.
    ///
    /// The entity keeps its hidden/frozen state; only the teardown is
    /// called off. Returns whether a registration was removed.
    pub fn cancel_deferred_destroy(&mut self, entity: EntityHandle) -> bool {
        let before = self.deferred.len();
        self.deferred.retain(|&pending| pending != entity);
        before != self.deferred.len()
    }

    /// Whether `entity` is flagged for removal at the next safe point.
    pub fn is_pending_destroy(&self, entity: EntityHandle) -> bool {
        self.deferred.contains(&entity)
    }

    /// Tears down every entity flagged for deferred destruction. Called
    /// between frames, when no handle is being dereferenced.
    ///
    /// Returns how many entities were destroyed.
    pub fn flush_deferred(&mut self) -> usize {
        let queue = std::mem::take(&mut self.deferred);
        let mut destroyed = 0;
        for entity in queue {
            // Re-validate: a recursive destroy may have taken the entity
            // down (and recycled the slot) since it was flagged.
            let still_pending = self
                .entities
                .get(entity)
                .is_some_and(|record| record.state == EntityState::PendingRemoval);
            if still_pending && self.destroy(entity) {
                destroyed += 1;
            }
        }
        destroyed
    }

    // --- Destruction ---

    /// Destroys `entity` immediately, recursing through entities attached
    /// to its mesh.
    ///
    /// Returns whether a live entity was destroyed.
    pub fn destroy(&mut self, entity: EntityHandle) -> bool {
        {
            let Some(record) = self.entities.get(entity) else {
                return false;
            };
            log::debug!("destroying entity {}", record.id());

            if record.id().instance() > 0 && !record.flags.contains(EntityFlags::NO_SAVE) {
                let id = record.id().string().to_owned();
                if record.script_spawned {
                    // In case we previously saved this entity...
                    self.saved_game.forget(&id);
                } else {
                    self.saved_game.record_deletion(&id);
                }
            }
        }

        // Entities attached to this one's mesh go down with it.
        loop {
            let child = match self
                .entities
                .get(entity)
                .and_then(Entity::object)
                .and_then(|object| object.linked.first())
            {
                Some(edge) => edge.entity,
                None => break,
            };
            let Some(object) = self.entities.get_mut(entity).and_then(Entity::object_mut)
            else {
                break;
            };
            object.unlink_child(child);
            if self.entities.get(child).is_some() {
                self.destroy(child);
            }
        }

        let Some(mut record) = self.entities.detach(entity) else {
            return false;
        };
        self.clean_references(&mut record);
        self.variant_teardown(&mut record);
        self.entities.release_slot(entity);
        true
    }

    /// Removes one unit from a stackable item, destroying the entity only
    /// when the stack is exhausted.
    ///
    /// Returns whether the entity itself was destroyed.
    pub fn destroy_one(&mut self, entity: EntityHandle) -> bool {
        match self.entities.get_mut(entity) {
            Some(record) => {
                if let EntityKind::Item(data) = &mut record.kind {
                    if data.count > 1 {
                        data.count -= 1;
                        return false;
                    }
                }
                self.destroy(entity)
            }
            None => false,
        }
    }

    /// Purges every back-reference other subsystems hold to `record`.
    ///
    /// Runs on an entity already detached from the table, before any
    /// variant-specific resource release. Every step is idempotent.
    fn clean_references(&mut self, record: &mut Entity) {
        let entity = record.handle();

        self.cancel_deferred_destroy(entity);

        self.weak_refs.clear_all(entity);

        self.treat_zone.remove(entity);
        record.flags.remove(EntityFlags::IN_ACTIVE_ZONE);

        self.speech.release_for(entity, &mut self.sounds);
        self.overlays.destroy_for(entity);

        self.remove_from_inventories(entity);

        self.timers.clear_for(entity);

        self.spells.end_by_caster(entity);

        self.lights.destroy(&mut record.ignition_light);
        self.sounds.stop(&mut record.ignition_sound);

        // Full-table sweep: no other entity may keep an attachment edge or
        // a wielded-weapon reference to this one. O(N), accepted because
        // destruction is not a per-frame path.
        for other in self.entities.iter_mut() {
            if let Some(object) = other.object_mut() {
                object.unlink_child(entity);
            }
            if let Some(npc) = other.kind.npc_mut() {
                if npc.weapon == Some(entity) {
                    npc.weapon = None;
                }
            }
        }
    }

    /// Releases everything `record` owns. Runs after [`Self::clean_references`].
    fn variant_teardown(&mut self, record: &mut Entity) {
        let entity = record.handle();

        record.tweaks.clear();

        // Owned objects are released here; shared stock meshes only drop
        // their reference.
        record.object = None;

        self.spells.remove_target(entity);

        record.script = None;
        record.over_script = None;

        for layer in &mut record.anim_layers {
            if let Some(anim) = layer.anim.take() {
                self.animations.release(anim);
            }
        }

        self.lights.destroy(&mut record.dynamic_light);

        record.follow_path = None;

        if let EntityKind::Camera(_) = record.kind {
            // The active-camera slot was cleared by the weak-ref sweep;
            // the engine's built-in player camera takes over.
            log::debug!("camera entity {} released the view", record.id());
        }

        // TODO decide whether contained items should be destroyed with
        // their container; for now they are orphaned at the container's
        // world position with their show state unchanged.
        if let Some(inventory) = record.inventory.take() {
            let drop_pos = record.pos;
            for item in inventory.items() {
                if let Some(orphan) = self.entities.get_mut(item) {
                    orphan.pos = drop_pos;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_registers_and_destroy_frees_the_handle() {
        let mut world = World::new();
        let rat = world.spawn("graph/interactive/npc/rat/rat", 1);
        assert!(world.entities.get(rat).is_some());

        assert!(world.destroy(rat));
        assert!(world.entities.get(rat).is_none());
        assert!(!world.destroy(rat));
    }

    #[test]
    fn treat_zone_helper_keeps_the_flag_in_sync() {
        let mut world = World::new();
        let rat = world.spawn("graph/interactive/npc/rat/rat", 1);

        world.set_in_treat_zone(rat, true);
        assert!(world.treat_zone.contains(rat));
        assert!(world
            .entities
            .get(rat)
            .unwrap()
            .flags
            .contains(EntityFlags::IN_ACTIVE_ZONE));

        world.set_in_treat_zone(rat, false);
        assert!(!world.treat_zone.contains(rat));
    }

    #[test]
    fn ignite_and_extinguish_round_trip_the_handles() {
        let mut world = World::new();
        let torch = world.spawn("items/provisions/torch/torch", 1);

        world.ignite(torch);
        assert_eq!(world.lights.live_count(), 1);
        assert_eq!(world.sounds.live_count(), 1);

        world.extinguish(torch);
        assert_eq!(world.lights.live_count(), 0);
        assert_eq!(world.sounds.live_count(), 0);
        assert_eq!(world.entities.get(torch).unwrap().ignition, 0.0);
    }
}
