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

//! The entity's variant payload.

use veldra_core::math::{Angle, Vec3};
use veldra_core::EntityHandle;

use crate::npc::CutFlags;

/// The kind-specific payload of an entity.
///
/// Exactly one variant is active for the entity's whole life (or
/// `Decorative` for markers and scenery with no payload), so the payload
/// can never disagree with a kind flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EntityKind {
    /// No payload: scenery, markers, or currency.
    #[default]
    Decorative,
    /// A pickable/stackable item.
    Item(ItemData),
    /// A creature.
    Npc(NpcData),
    /// A fixed interactive fixture.
    Fixed(FixedData),
    /// A scripted camera.
    Camera(CameraData),
}

impl EntityKind {
    /// Whether this is the NPC variant.
    #[inline]
    pub fn is_npc(&self) -> bool {
        matches!(self, EntityKind::Npc(_))
    }

    /// Whether this is the item variant.
    #[inline]
    pub fn is_item(&self) -> bool {
        matches!(self, EntityKind::Item(_))
    }

    /// The NPC payload, if this is the NPC variant.
    pub fn npc(&self) -> Option<&NpcData> {
        match self {
            EntityKind::Npc(data) => Some(data),
            _ => None,
        }
    }

    /// The mutable NPC payload, if this is the NPC variant.
    pub fn npc_mut(&mut self) -> Option<&mut NpcData> {
        match self {
            EntityKind::Npc(data) => Some(data),
            _ => None,
        }
    }

    /// The item payload, if this is the item variant.
    pub fn item(&self) -> Option<&ItemData> {
        match self {
            EntityKind::Item(data) => Some(data),
            _ => None,
        }
    }

    /// The mutable item payload, if this is the item variant.
    pub fn item_mut(&mut self) -> Option<&mut ItemData> {
        match self {
            EntityKind::Item(data) => Some(data),
            _ => None,
        }
    }
}

/// One stat modifier granted by equipping an item.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipModifier {
    /// The stat the modifier applies to.
    pub stat: String,
    /// The modifier value.
    pub value: f32,
    /// Whether `value` is a percentage rather than an absolute bonus.
    pub percent: bool,
}

/// Equip overlay for wearable/wieldable items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipData {
    /// Stat modifiers applied while equipped.
    pub modifiers: Vec<EquipModifier>,
}

/// Payload of a pickable/stackable item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemData {
    /// Current stack count.
    pub count: u16,
    /// Largest stack this item allows.
    pub max_count: u16,
    /// Base price of one unit.
    pub price: f32,
    /// The equip overlay, for items that can be worn or wielded.
    pub equip: Option<EquipData>,
}

impl Default for ItemData {
    fn default() -> Self {
        Self {
            count: 1,
            max_count: 1,
            price: 0.0,
            equip: None,
        }
    }
}

/// Payload of a creature.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcData {
    /// Current life.
    pub life: f32,
    /// Maximum life.
    pub max_life: f32,
    /// The currently wielded weapon entity, if any. A weak back-reference;
    /// cleared by the destroy sweep when the weapon goes away.
    pub weapon: Option<EntityHandle>,
    /// Persistent dismemberment mask.
    pub cuts: CutFlags,
    /// Whether hide-flags for `cuts` are currently applied to the mesh.
    pub cut_applied: bool,
}

impl Default for NpcData {
    fn default() -> Self {
        Self {
            life: 20.0,
            max_life: 20.0,
            weapon: None,
            cuts: CutFlags::NONE,
            cut_applied: false,
        }
    }
}

/// Payload of a fixed interactive fixture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedData {
    /// Trap strength, or negative for no trap.
    pub trap_value: i8,
}

/// Payload of a scripted camera.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraData {
    /// The camera position.
    pub pos: Vec3,
    /// The camera orientation.
    pub angle: Angle,
    /// The focal length.
    pub focal: f32,
}
