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

//! The entity record and its handle-indexed table.

mod flags;
mod id;
mod kind;
mod manager;

pub use flags::EntityFlags;
pub use id::EntityId;
pub use kind::{CameraData, EntityKind, EquipData, EquipModifier, FixedData, ItemData, NpcData};
pub use manager::EntityManager;

use std::sync::Arc;

use veldra_core::math::{Aabb, Angle, Color3, ScreenBox, Vec3};
use veldra_core::{EntityHandle, EntityInstance};
use veldra_scene::{CollisionCylinder, Object3d};

use crate::script::{Script, MAIN_EVENT};
use crate::world::{LightHandle, SoundHandle};

/// Number of animation layers an entity can blend.
pub const MAX_ANIM_LAYERS: usize = 4;

/// Default bounce restitution for physical entities.
pub const BASE_RUBBER: f32 = 0.9;

/// Visibility state of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShowState {
    /// Simulated and rendered in the scene.
    #[default]
    InScene,
    /// Carried inside a container; not in world space.
    InInventory,
    /// Simulated but not rendered.
    NotDrawn,
    /// Hidden by a script.
    Hidden,
    /// Fully removed from sight and interaction, pending teardown.
    MegaHidden,
}

/// Lifecycle state of an entity while registered in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntityState {
    /// Normal simulation.
    #[default]
    Active,
    /// Flagged for removal at the next safe point. Entering this state is
    /// the only place the mega-hidden/freeze-script pair is set.
    PendingRemoval,
}

/// The entity's 3D representation and how it is owned.
///
/// Most entities own their object exclusively; camera, marker and currency
/// entities render a stock mesh and only hold a shared, immutable
/// reference to it.
#[derive(Debug, Clone)]
pub enum EntityObject {
    /// Exclusively owned, mutable representation.
    Owned(Box<Object3d>),
    /// Shared immutable stock mesh.
    Shared(Arc<Object3d>),
}

/// Halo render state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Halo {
    /// Halo color.
    pub color: Color3,
    /// Halo radius.
    pub radius: f32,
    /// Whether the halo is drawn.
    pub active: bool,
}

impl Default for Halo {
    fn default() -> Self {
        Self {
            color: Color3::new(0.2, 0.5, 1.0),
            radius: 45.0,
            active: false,
        }
    }
}

/// One animation layer: an optional handle to a shared animation resource
/// plus its start time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimLayer {
    /// The animation playing on this layer.
    pub anim: Option<crate::world::AnimHandle>,
    /// Game time the layer started, in milliseconds.
    pub start_time: u64,
}

/// Cross-layer animation blend state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimBlendState {
    /// Whether a blend is in progress.
    pub active: bool,
    /// Game time of the last animation change, in milliseconds.
    pub last_anim_time: u64,
}

/// A pending mesh tweak (skin swap, icon swap, partial mesh replacement)
/// re-applied when the entity's mesh is reloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweakRecord {
    /// The tweak operation name.
    pub op: String,
    /// First operand (e.g. the mesh or texture to apply).
    pub param1: String,
    /// Second operand.
    pub param2: String,
}

/// Path-following state for entities moving along a named path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowPath {
    /// The path name.
    pub path: String,
    /// Game time the entity entered the path, in milliseconds.
    pub start_time: u64,
}

/// A simulated game object: creature, item, fixture, camera, or scenery.
///
/// Entities are owned by the [`EntityManager`]; every other subsystem
/// refers to them through their [`EntityHandle`] and re-validates the
/// handle on use.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    handle: EntityHandle,

    /// Whether the entity was spawned by a script at runtime rather than
    /// placed in level data. Drives the save-deletion bookkeeping.
    pub script_spawned: bool,
    /// Behavior flags.
    pub flags: EntityFlags,
    /// Lifecycle state.
    pub state: EntityState,
    /// Visibility state.
    pub show: ShowState,

    // --- spatial state, mutated every simulation tick ---
    /// World-space position.
    pub pos: Vec3,
    /// Position on the previous tick.
    pub last_pos: Vec3,
    /// Position the entity spawned at.
    pub initial_pos: Vec3,
    /// Movement applied this tick.
    pub move_delta: Vec3,
    /// Movement applied on the previous tick.
    pub last_move: Vec3,
    /// Externally forced movement, consumed by physics.
    pub forced_move: Vec3,
    /// Orientation.
    pub angle: Angle,
    /// Uniform scale.
    pub scale: f32,
    /// World-space bounds.
    pub bbox3: Aabb,
    /// Projected screen-space bounds.
    pub bbox2: ScreenBox,

    // --- presentation ---
    /// Current halo.
    pub halo: Halo,
    /// The halo the entity's class defines; scripts restore to this.
    pub halo_native: Halo,
    /// Tint under infravision.
    pub infra_color: Color3,
    /// Mass for physics.
    pub weight: f32,
    /// Bounce restitution.
    pub rubber: f32,
    /// Current burn intensity; non-zero while ignited.
    pub ignition: f32,

    // --- 3D representation ---
    /// The mesh/skeleton representation, if loaded.
    pub object: Option<EntityObject>,
    /// Coarse cylinder for entity-vs-world collision, if derived.
    pub cylinder: Option<CollisionCylinder>,
    /// Entity this one never collides with (a severed part's source).
    pub no_collide: Option<EntityHandle>,

    // --- animation ---
    /// Animation layers.
    pub anim_layers: [AnimLayer; MAX_ANIM_LAYERS],
    /// Cross-layer blend state.
    pub anim_blend: AnimBlendState,

    // --- scripts ---
    /// The class script.
    pub script: Option<Script>,
    /// The per-instance override script.
    pub over_script: Option<Script>,
    /// The event driving the script when idle.
    pub main_event: String,
    /// Events queued for delivery to the script.
    pub pending_events: Vec<String>,

    // --- owned sub-resources ---
    /// Items carried by this entity.
    pub inventory: Option<crate::inventory::Inventory>,
    /// Mesh tweaks to re-apply on reload.
    pub tweaks: Vec<TweakRecord>,
    /// Light created for this entity's glow, if any.
    pub dynamic_light: Option<LightHandle>,
    /// Light created when the entity ignited, if any.
    pub ignition_light: Option<LightHandle>,
    /// Looping sound started when the entity ignited, if any.
    pub ignition_sound: Option<SoundHandle>,
    /// Path-following state, if the entity is on a path.
    pub follow_path: Option<FollowPath>,

    /// The kind-specific payload.
    pub kind: EntityKind,
}

impl Entity {
    /// Creates an entity with default state and no variant payload.
    ///
    /// The caller (normally [`crate::World::spawn`]) registers it in the
    /// table and then populates the kind payload and flags.
    pub(crate) fn new(class_path: &str, instance: EntityInstance) -> Self {
        Self {
            id: EntityId::new(class_path, instance),
            handle: EntityHandle::new(u32::MAX),
            script_spawned: false,
            flags: EntityFlags::NEED_INIT | EntityFlags::INTERACTIVITY,
            state: EntityState::Active,
            show: ShowState::InScene,
            pos: Vec3::ZERO,
            last_pos: Vec3::ZERO,
            initial_pos: Vec3::ZERO,
            move_delta: Vec3::ZERO,
            last_move: Vec3::ZERO,
            forced_move: Vec3::ZERO,
            angle: Angle::ZERO,
            scale: 1.0,
            bbox3: Aabb::ZERO,
            bbox2: ScreenBox::OFFSCREEN,
            halo: Halo::default(),
            halo_native: Halo::default(),
            infra_color: Color3::BLUE,
            weight: 1.0,
            rubber: BASE_RUBBER,
            ignition: 0.0,
            object: None,
            cylinder: None,
            no_collide: None,
            anim_layers: [AnimLayer::default(); MAX_ANIM_LAYERS],
            anim_blend: AnimBlendState::default(),
            script: None,
            over_script: None,
            main_event: MAIN_EVENT.to_owned(),
            pending_events: Vec::new(),
            inventory: None,
            tweaks: Vec::new(),
            dynamic_light: None,
            ignition_light: None,
            ignition_sound: None,
            follow_path: None,
            kind: EntityKind::Decorative,
        }
    }

    /// The immutable identity.
    #[inline]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// The table handle. Valid until the entity is destroyed.
    #[inline]
    pub fn handle(&self) -> EntityHandle {
        self.handle
    }

    pub(crate) fn set_handle(&mut self, handle: EntityHandle) {
        self.handle = handle;
    }

    /// Read access to the 3D object, owned or shared.
    pub fn object(&self) -> Option<&Object3d> {
        match &self.object {
            Some(EntityObject::Owned(object)) => Some(object),
            Some(EntityObject::Shared(object)) => Some(object),
            None => None,
        }
    }

    /// Mutable access to the 3D object.
    ///
    /// `None` for shared stock meshes, which are immutable.
    pub fn object_mut(&mut self) -> Option<&mut Object3d> {
        match &mut self.object {
            Some(EntityObject::Owned(object)) => Some(object),
            _ => None,
        }
    }

    /// Whether script events may still be delivered to this entity.
    ///
    /// False once the entity is pending removal or its script is frozen.
    pub fn accepts_events(&self) -> bool {
        self.state == EntityState::Active && !self.flags.contains(EntityFlags::FREEZE_SCRIPT)
    }

    /// Moves the entity, maintaining the last-position and delta fields
    /// the physics step reads.
    pub fn update_position(&mut self, new_pos: Vec3) {
        self.last_pos = self.pos;
        self.last_move = self.move_delta;
        self.move_delta = new_pos - self.pos;
        self.pos = new_pos;
    }

    /// Restores the halo to the class-defined native halo.
    pub fn set_halo_to_native(&mut self) {
        self.halo = self.halo_native;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entity_has_no_payload_and_needs_init() {
        let entity = Entity::new("graph/interactive/npc/rat/rat", 1);
        assert_eq!(entity.kind, EntityKind::Decorative);
        assert!(entity.flags.contains(EntityFlags::NEED_INIT));
        assert!(entity.flags.contains(EntityFlags::INTERACTIVITY));
        assert_eq!(entity.show, ShowState::InScene);
        assert_eq!(entity.state, EntityState::Active);
        assert!(entity.accepts_events());
    }

    #[test]
    fn update_position_tracks_deltas() {
        let mut entity = Entity::new("item/rock/rock", 1);
        entity.pos = Vec3::new(1.0, 0.0, 0.0);
        entity.update_position(Vec3::new(3.0, 0.0, 4.0));
        assert_eq!(entity.last_pos, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(entity.move_delta, Vec3::new(2.0, 0.0, 4.0));
        assert_eq!(entity.pos, Vec3::new(3.0, 0.0, 4.0));
    }

    #[test]
    fn frozen_script_stops_event_delivery() {
        let mut entity = Entity::new("item/rock/rock", 1);
        entity.flags |= EntityFlags::FREEZE_SCRIPT;
        assert!(!entity.accepts_events());
    }
}
