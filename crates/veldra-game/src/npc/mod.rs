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

//! NPC-specific gameplay systems.

pub mod dismemberment;

use serde::{Deserialize, Serialize};

/// Persistent dismemberment state bits on an NPC.
///
/// The mask survives on the NPC payload so hide-flags can be re-applied
/// after the mesh is reloaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CutFlags {
    bits: u32,
}

impl CutFlags {
    /// No regions cut.
    pub const NONE: Self = Self { bits: 0 };
    /// The head region.
    pub const HEAD: Self = Self { bits: 1 << 0 };
    /// The torso region. Supersedes head and both arms once set.
    pub const TORSO: Self = Self { bits: 1 << 1 };
    /// The left arm region.
    pub const LEFT_ARM: Self = Self { bits: 1 << 2 };
    /// The right arm region.
    pub const RIGHT_ARM: Self = Self { bits: 1 << 3 };
    /// The left leg region.
    pub const LEFT_LEG: Self = Self { bits: 1 << 4 };
    /// The right leg region.
    pub const RIGHT_LEG: Self = Self { bits: 1 << 5 };

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
        other.bits != 0 && (self.bits & other.bits) == other.bits
    }

    /// Clears the bits of `other`.
    pub fn remove(&mut self, other: Self) {
        self.bits &= !other.bits;
    }

    /// Checks if no regions are cut.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for CutFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for CutFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// A nameable cut region, used where a single region must be configured
/// or serialized (as opposed to the [`CutFlags`] mask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CutRegion {
    /// The head region.
    Head,
    /// The torso region.
    Torso,
    /// The left arm region.
    LeftArm,
    /// The right arm region.
    RightArm,
    /// The left leg region.
    LeftLeg,
    /// The right leg region.
    RightLeg,
}

impl CutRegion {
    /// The flag bit for this region.
    pub const fn flag(self) -> CutFlags {
        match self {
            CutRegion::Head => CutFlags::HEAD,
            CutRegion::Torso => CutFlags::TORSO,
            CutRegion::LeftArm => CutFlags::LEFT_ARM,
            CutRegion::RightArm => CutFlags::RIGHT_ARM,
            CutRegion::LeftLeg => CutFlags::LEFT_LEG,
            CutRegion::RightLeg => CutFlags::RIGHT_LEG,
        }
    }
}
