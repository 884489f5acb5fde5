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

//! Texture slots and name-driven surface flags.
//!
//! Art assets encode surface behavior in their texture names; the loader
//! tags each slot once so per-face checks stay cheap.

use crate::object::FaceFlags;

/// A texture slot referenced by faces through its index in the object's
/// texture list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureSlot {
    /// The texture resource name.
    pub name: String,
    /// Surface flags derived from the name.
    pub flags: FaceFlags,
}

impl TextureSlot {
    /// Creates a slot for `name`, deriving its surface flags.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let flags = derive_surface_flags(&name);
        Self { name, flags }
    }

    /// Whether this slot holds the special severed-surface material.
    #[inline]
    pub fn is_gore(&self) -> bool {
        self.name.contains("gore")
    }
}

/// Derives surface flags from substrings of a texture name.
pub fn derive_surface_flags(name: &str) -> FaceFlags {
    let mut flags = FaceFlags::NONE;

    if name.contains("npc_") {
        flags |= FaceFlags::LATE_MIP;
    }
    if name.contains("nocol") {
        flags |= FaceFlags::NO_COLLIDE;
    }
    if name.contains("climb") {
        flags |= FaceFlags::CLIMB;
    }
    if name.contains("fall") {
        flags |= FaceFlags::FALL;
    }
    if name.contains("lava") {
        flags |= FaceFlags::LAVA;
    }

    if name.contains("water") || name.contains("spider_web") {
        flags |= FaceFlags::WATER;
        flags |= FaceFlags::TRANSPARENT;
    } else if name.contains("[metal]") {
        flags |= FaceFlags::METAL;
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_names_are_transparent() {
        let slot = TextureSlot::new("cave_water_01");
        assert!(slot.flags.contains(FaceFlags::WATER));
        assert!(slot.flags.contains(FaceFlags::TRANSPARENT));
        assert!(!slot.flags.contains(FaceFlags::METAL));
    }

    #[test]
    fn water_wins_over_metal() {
        let slot = TextureSlot::new("water_[metal]_grate");
        assert!(slot.flags.contains(FaceFlags::WATER));
        assert!(!slot.flags.contains(FaceFlags::METAL));
    }

    #[test]
    fn gore_detection_is_substring_based() {
        assert!(TextureSlot::new("npc_human_gore_a").is_gore());
        assert!(!TextureSlot::new("npc_human_base").is_gore());
    }
}
