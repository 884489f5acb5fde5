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

//! Active spell effects and their caster/target bookkeeping.
//!
//! Spell behavior and visuals are collaborator concerns; the core tracks
//! who cast what at whom so teardown can end a destroyed caster's spells
//! and strip a destroyed target from every target list.

use veldra_core::EntityHandle;

/// Handle to an active spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpellHandle(u32);

/// An active spell effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spell {
    /// The spell name.
    pub name: String,
    /// The casting entity.
    pub caster: EntityHandle,
    /// Entities the spell currently affects.
    pub targets: Vec<EntityHandle>,
}

/// Slot-based registry of active spells.
#[derive(Debug, Default)]
pub struct SpellRegistry {
    slots: Vec<Option<Spell>>,
}

impl SpellRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an active spell.
    pub fn cast(
        &mut self,
        name: &str,
        caster: EntityHandle,
        targets: Vec<EntityHandle>,
    ) -> SpellHandle {
        let spell = Spell {
            name: name.to_owned(),
            caster,
            targets,
        };
        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                self.slots[index] = Some(spell);
                SpellHandle(index as u32)
            }
            None => {
                self.slots.push(Some(spell));
                SpellHandle((self.slots.len() - 1) as u32)
            }
        }
    }

    /// Looks up an active spell.
    pub fn get(&self, handle: SpellHandle) -> Option<&Spell> {
        self.slots.get(handle.0 as usize).and_then(Option::as_ref)
    }

    /// Ends every spell cast by `caster`, returning how many were ended.
    /// Idempotent.
    pub fn end_by_caster(&mut self, caster: EntityHandle) -> usize {
        let mut ended = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|spell| spell.caster == caster) {
                *slot = None;
                ended += 1;
            }
        }
        ended
    }

    /// Removes `entity` from every active spell's target list, returning
    /// how many lists were touched. The spells keep running.
    pub fn remove_target(&mut self, entity: EntityHandle) -> usize {
        let mut touched = 0;
        for spell in self.slots.iter_mut().flatten() {
            let before = spell.targets.len();
            spell.targets.retain(|&target| target != entity);
            if spell.targets.len() != before {
                touched += 1;
            }
        }
        touched
    }

    /// Active spells cast by `caster`.
    pub fn count_by_caster(&self, caster: EntityHandle) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|spell| spell.caster == caster)
            .count()
    }

    /// Whether any active spell still targets `entity`.
    pub fn targets(&self, entity: EntityHandle) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|spell| spell.targets.contains(&entity))
    }

    /// All active spells.
    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.slots.iter().flatten()
    }

    /// Number of active spells.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_by_caster_ends_only_that_casters_spells() {
        let mut spells = SpellRegistry::new();
        let caster = EntityHandle::new(0);
        let other = EntityHandle::new(1);
        spells.cast("fireball", caster, vec![other]);
        spells.cast("heal", caster, Vec::new());
        let kept = spells.cast("curse", other, vec![caster]);

        assert_eq!(spells.end_by_caster(caster), 2);
        assert_eq!(spells.live_count(), 1);
        assert_eq!(spells.get(kept).unwrap().name, "curse");
        assert_eq!(spells.end_by_caster(caster), 0);
    }

    #[test]
    fn remove_target_strips_lists_but_keeps_spells() {
        let mut spells = SpellRegistry::new();
        let caster = EntityHandle::new(0);
        let victim = EntityHandle::new(1);
        let handle = spells.cast("poison", caster, vec![victim, EntityHandle::new(2)]);

        assert_eq!(spells.remove_target(victim), 1);
        assert!(!spells.targets(victim));
        assert_eq!(spells.get(handle).unwrap().targets.len(), 1);
        assert_eq!(spells.live_count(), 1);
    }
}
