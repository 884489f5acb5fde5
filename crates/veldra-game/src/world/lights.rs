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

//! The dynamic light registry.
//!
//! Entities only store [`LightHandle`]s; the rendering side of lighting is
//! a collaborator concern. Destroy is idempotent and bounds-checked so the
//! cleanup protocol can call it unconditionally.

use veldra_core::math::{Color3, Vec3};

/// Handle to a dynamic light owned by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightHandle(u32);

/// A dynamic light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// World-space position.
    pub pos: Vec3,
    /// Light color.
    pub color: Color3,
    /// Falloff radius.
    pub radius: f32,
    /// Brightness multiplier.
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            color: Color3::WHITE,
            radius: 100.0,
            intensity: 1.0,
        }
    }
}

/// Slot-based registry of live dynamic lights.
#[derive(Debug, Default)]
pub struct LightRegistry {
    slots: Vec<Option<Light>>,
}

impl LightRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `light`, reusing a free slot when one exists.
    pub fn create(&mut self, light: Light) -> LightHandle {
        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                self.slots[index] = Some(light);
                LightHandle(index as u32)
            }
            None => {
                self.slots.push(Some(light));
                LightHandle((self.slots.len() - 1) as u32)
            }
        }
    }

    /// Looks up a live light.
    pub fn get(&self, handle: LightHandle) -> Option<&Light> {
        self.slots.get(handle.0 as usize).and_then(Option::as_ref)
    }

    /// Destroys the light referenced by `handle`, clearing the slot that
    /// held the handle.
    ///
    /// Safe to call with an empty or stale slot; both are no-ops.
    pub fn destroy(&mut self, handle: &mut Option<LightHandle>) {
        if let Some(light) = handle.take() {
            if let Some(slot) = self.slots.get_mut(light.0 as usize) {
                *slot = None;
            }
        }
    }

    /// Number of live lights.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destroy_is_idempotent_and_clears_the_slot() {
        let mut lights = LightRegistry::new();
        let mut handle = Some(lights.create(Light::default()));
        assert_eq!(lights.live_count(), 1);

        lights.destroy(&mut handle);
        assert_eq!(handle, None);
        assert_eq!(lights.live_count(), 0);

        // Destroying an already-cleared slot is a no-op.
        lights.destroy(&mut handle);
        assert_eq!(lights.live_count(), 0);
    }

    #[test]
    fn create_reuses_freed_slots() {
        let mut lights = LightRegistry::new();
        let a = lights.create(Light::default());
        let _b = lights.create(Light::default());
        let mut slot = Some(a);
        lights.destroy(&mut slot);

        let c = lights.create(Light::default());
        assert_eq!(c, a);
        assert_eq!(lights.live_count(), 2);
    }
}
