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

//! The speech queue and the dynamic info overlays.
//!
//! Both hold per-entity presentation state that must not outlive its
//! entity: queued speech keeps a sound source alive, overlays keep text on
//! screen.

use veldra_core::EntityHandle;

use crate::world::sounds::{SoundHandle, SoundRegistry};

/// One queued line of speech.
#[derive(Debug)]
pub struct SpeechEntry {
    /// The speaking entity.
    pub speaker: EntityHandle,
    /// The spoken text, for subtitles.
    pub text: String,
    /// The voice sample playing for this line, if any.
    pub sample: Option<SoundHandle>,
}

/// Queued speech, in delivery order.
#[derive(Debug, Default)]
pub struct SpeechQueue {
    entries: Vec<SpeechEntry>,
}

impl SpeechQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a line of speech.
    pub fn push(&mut self, entry: SpeechEntry) {
        self.entries.push(entry);
    }

    /// Releases every entry spoken by `speaker`, stopping the voice samples
    /// they keep alive. Returns how many entries were released.
    pub fn release_for(&mut self, speaker: EntityHandle, sounds: &mut SoundRegistry) -> usize {
        let before = self.entries.len();
        for entry in &mut self.entries {
            if entry.speaker == speaker {
                if let Some(sample) = entry.sample.take() {
                    sounds.stop_handle(sample);
                }
            }
        }
        self.entries.retain(|entry| entry.speaker != speaker);
        before - self.entries.len()
    }

    /// Number of entries spoken by `speaker`.
    pub fn count_for(&self, speaker: EntityHandle) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.speaker == speaker)
            .count()
    }

    /// Total number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A transient on-screen text overlay tied to an entity (name plates,
/// damage numbers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoOverlay {
    /// The entity the overlay follows.
    pub entity: EntityHandle,
    /// The overlay text.
    pub text: String,
}

/// All live info overlays.
#[derive(Debug, Default)]
pub struct InfoOverlays {
    overlays: Vec<InfoOverlay>,
}

impl InfoOverlays {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows an overlay.
    pub fn push(&mut self, overlay: InfoOverlay) {
        self.overlays.push(overlay);
    }

    /// Destroys every overlay following `entity`, returning how many were
    /// destroyed. Idempotent.
    pub fn destroy_for(&mut self, entity: EntityHandle) -> usize {
        let before = self.overlays.len();
        self.overlays.retain(|overlay| overlay.entity != entity);
        before - self.overlays.len()
    }

    /// Number of overlays following `entity`.
    pub fn count_for(&self, entity: EntityHandle) -> usize {
        self.overlays
            .iter()
            .filter(|overlay| overlay.entity == entity)
            .count()
    }

    /// Total number of live overlays.
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Whether no overlays are live.
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_for_stops_the_voice_samples() {
        let mut sounds = SoundRegistry::new();
        let mut speech = SpeechQueue::new();
        let speaker = EntityHandle::new(2);
        let other = EntityHandle::new(3);

        let sample = sounds.play("speech/guard_hello");
        speech.push(SpeechEntry {
            speaker,
            text: "Halt!".to_owned(),
            sample: Some(sample),
        });
        speech.push(SpeechEntry {
            speaker: other,
            text: "...".to_owned(),
            sample: None,
        });

        assert_eq!(speech.release_for(speaker, &mut sounds), 1);
        assert!(!sounds.is_playing(sample));
        assert_eq!(speech.len(), 1);
        assert_eq!(speech.release_for(speaker, &mut sounds), 0);
    }

    #[test]
    fn overlays_are_destroyed_per_entity() {
        let mut overlays = InfoOverlays::new();
        let a = EntityHandle::new(0);
        overlays.push(InfoOverlay {
            entity: a,
            text: "Guard".to_owned(),
        });
        overlays.push(InfoOverlay {
            entity: EntityHandle::new(1),
            text: "Rat".to_owned(),
        });

        assert_eq!(overlays.destroy_for(a), 1);
        assert_eq!(overlays.count_for(a), 0);
        assert_eq!(overlays.len(), 1);
    }
}
