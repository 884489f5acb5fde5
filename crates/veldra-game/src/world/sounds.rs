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

//! The sound-source registry.
//!
//! Mixing and output are collaborator concerns; this registry only tracks
//! which sourced samples are live so stop calls stay idempotent.

use veldra_core::math::Vec3;

/// Handle to a playing sound source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(u32);

#[derive(Debug)]
struct Source {
    sample: String,
    pos: Option<Vec3>,
}

/// Slot-based registry of live sound sources.
#[derive(Debug, Default)]
pub struct SoundRegistry {
    slots: Vec<Option<Source>>,
}

impl SoundRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts playing `sample` with no world position (interface sounds,
    /// looping ambience).
    pub fn play(&mut self, sample: &str) -> SoundHandle {
        self.start(sample, None)
    }

    /// Starts playing `sample` at a world position.
    pub fn play_at(&mut self, sample: &str, pos: Vec3) -> SoundHandle {
        self.start(sample, Some(pos))
    }

    fn start(&mut self, sample: &str, pos: Option<Vec3>) -> SoundHandle {
        let source = Source {
            sample: sample.to_owned(),
            pos,
        };
        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                self.slots[index] = Some(source);
                SoundHandle(index as u32)
            }
            None => {
                self.slots.push(Some(source));
                SoundHandle((self.slots.len() - 1) as u32)
            }
        }
    }

    /// Stops the source referenced by `handle`, clearing the slot that held
    /// the handle.
    ///
    /// Safe to call with an empty or stale slot; both are no-ops.
    pub fn stop(&mut self, handle: &mut Option<SoundHandle>) {
        if let Some(sound) = handle.take() {
            self.stop_handle(sound);
        }
    }

    pub(crate) fn stop_handle(&mut self, handle: SoundHandle) {
        if let Some(slot) = self.slots.get_mut(handle.0 as usize) {
            *slot = None;
        }
    }

    /// Whether `handle` still refers to a live source.
    pub fn is_playing(&self, handle: SoundHandle) -> bool {
        self.slots
            .get(handle.0 as usize)
            .is_some_and(Option::is_some)
    }

    /// The sample name of a live source.
    pub fn sample_name(&self, handle: SoundHandle) -> Option<&str> {
        self.slots
            .get(handle.0 as usize)
            .and_then(Option::as_ref)
            .map(|source| source.sample.as_str())
    }

    /// The world position of a live source, `None` for flat sources.
    pub fn position(&self, handle: SoundHandle) -> Option<Vec3> {
        self.slots
            .get(handle.0 as usize)
            .and_then(Option::as_ref)
            .and_then(|source| source.pos)
    }

    /// Number of live sources.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_idempotent() {
        let mut sounds = SoundRegistry::new();
        let mut handle = Some(sounds.play("sfx/ignite"));
        assert_eq!(sounds.live_count(), 1);

        sounds.stop(&mut handle);
        assert_eq!(handle, None);
        sounds.stop(&mut handle);
        assert_eq!(sounds.live_count(), 0);
    }

    #[test]
    fn positioned_and_flat_sources_share_the_registry() {
        let mut sounds = SoundRegistry::new();
        let a = sounds.play("sfx/dismember");
        let b = sounds.play_at("sfx/fire_loop", Vec3::new(1.0, 2.0, 3.0));
        assert!(sounds.is_playing(a));
        assert_eq!(sounds.sample_name(b), Some("sfx/fire_loop"));
        assert_eq!(sounds.live_count(), 2);
    }
}
