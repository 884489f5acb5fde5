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

//! Entity behavior flags.

/// Behavior flags on an entity.
///
/// These select behaviors, never the variant payload — the payload is the
/// [`crate::entity::EntityKind`] sum type. Multiple flags can be combined
/// using bitwise operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EntityFlags {
    bits: u32,
}

impl EntityFlags {
    /// No flags.
    pub const NONE: Self = Self { bits: 0 };
    /// The entity can be pushed around by physics.
    pub const MOVABLE: Self = Self { bits: 1 << 0 };
    /// The entity is never persisted to a save game.
    pub const NO_SAVE: Self = Self { bits: 1 << 1 };
    /// Currency; shares its geometry instead of owning it.
    pub const GOLD: Self = Self { bits: 1 << 2 };
    /// Invisible level marker; shares its geometry instead of owning it.
    pub const MARKER: Self = Self { bits: 1 << 3 };
    /// Script events are not delivered to the entity.
    pub const FREEZE_SCRIPT: Self = Self { bits: 1 << 4 };
    /// The entity can never be dismembered.
    pub const NO_GORE: Self = Self { bits: 1 << 5 };
    /// Marks a severed part flying away from its source.
    pub const GORE_EXPLODE: Self = Self { bits: 1 << 6 };
    /// Excluded from entity-vs-entity physics collisions.
    pub const NO_PHYS_COLLISION: Self = Self { bits: 1 << 7 };
    /// The entity reacts to interaction.
    pub const INTERACTIVITY: Self = Self { bits: 1 << 8 };
    /// The entity's script init event has not run yet.
    pub const NEED_INIT: Self = Self { bits: 1 << 9 };
    /// The entity is in the active-processing zone set.
    pub const IN_ACTIVE_ZONE: Self = Self { bits: 1 << 10 };

    /// Creates flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks whether all bits of `other` are set.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Clears the bits of `other`.
    pub fn remove(&mut self, other: Self) {
        self.bits &= !other.bits;
    }

    /// Checks if no flags are set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for EntityFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for EntityFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}
