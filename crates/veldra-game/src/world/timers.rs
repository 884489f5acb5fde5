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

//! Script timers scheduled against entities.
//!
//! The script runtime fires these; the core only owns the bookkeeping so
//! that a destroyed entity's timers can be cleared in one pass.

use veldra_core::EntityHandle;

/// A timer scheduled by a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTimer {
    /// The timer name scripts address it by.
    pub name: String,
    /// The entity the timer delivers its event to, if any.
    pub entity: Option<EntityHandle>,
    /// Interval between firings, in milliseconds.
    pub interval_ms: u64,
    /// Game time of the next firing, in milliseconds.
    pub next_fire_ms: u64,
    /// Firings left, or `None` for a repeating timer.
    pub remaining: Option<u32>,
}

/// All currently scheduled script timers.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    timers: Vec<ScriptTimer>,
}

impl TimerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `timer`.
    pub fn schedule(&mut self, timer: ScriptTimer) {
        self.timers.push(timer);
    }

    /// Removes every timer scheduled against `entity`, returning how many
    /// were removed. Idempotent.
    pub fn clear_for(&mut self, entity: EntityHandle) -> usize {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.entity != Some(entity));
        before - self.timers.len()
    }

    /// Number of timers scheduled against `entity`.
    pub fn count_for(&self, entity: EntityHandle) -> usize {
        self.timers
            .iter()
            .filter(|timer| timer.entity == Some(entity))
            .count()
    }

    /// All scheduled timers.
    pub fn iter(&self) -> impl Iterator<Item = &ScriptTimer> {
        self.timers.iter()
    }

    /// Total number of scheduled timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are scheduled.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(name: &str, entity: Option<EntityHandle>) -> ScriptTimer {
        ScriptTimer {
            name: name.to_owned(),
            entity,
            interval_ms: 1000,
            next_fire_ms: 1000,
            remaining: Some(1),
        }
    }

    #[test]
    fn clear_for_removes_only_that_entitys_timers() {
        let mut timers = TimerRegistry::new();
        let a = EntityHandle::new(0);
        let b = EntityHandle::new(1);
        timers.schedule(timer("wake", Some(a)));
        timers.schedule(timer("patrol", Some(a)));
        timers.schedule(timer("respawn", Some(b)));
        timers.schedule(timer("global_tick", None));

        assert_eq!(timers.clear_for(a), 2);
        assert_eq!(timers.count_for(a), 0);
        assert_eq!(timers.count_for(b), 1);
        assert_eq!(timers.len(), 2);

        assert_eq!(timers.clear_for(a), 0);
    }
}
