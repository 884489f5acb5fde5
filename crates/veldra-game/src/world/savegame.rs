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

//! Destroy-time bookkeeping hooks for the save system.
//!
//! The save-file format itself is a collaborator concern; the core only
//! records which string identifiers were deleted since the last save, and
//! drops the record of script-spawned entities that were persisted earlier
//! and no longer exist.

use std::collections::BTreeSet;

/// The in-memory log the save system consults on the next store.
#[derive(Debug, Default)]
pub struct SavedGameLog {
    saved: BTreeSet<String>,
    deletions: BTreeSet<String>,
}

impl SavedGameLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as present in the current save, as the load path does
    /// when it restores an entity.
    pub fn mark_saved(&mut self, id: &str) {
        self.saved.insert(id.to_owned());
    }

    /// Records that the level-placed entity `id` was deleted, so reloading
    /// the level skips it.
    pub fn record_deletion(&mut self, id: &str) {
        log::debug!("recording deletion of {id}");
        self.deletions.insert(id.to_owned());
    }

    /// Drops the saved record for the script-spawned entity `id`.
    /// A no-op when `id` was never saved.
    pub fn forget(&mut self, id: &str) {
        self.saved.remove(id);
    }

    /// Whether `id` has a deletion recorded.
    pub fn is_deleted(&self, id: &str) -> bool {
        self.deletions.contains(id)
    }

    /// Whether `id` is recorded as present in the current save.
    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletions_and_saves_are_tracked_separately() {
        let mut log = SavedGameLog::new();
        log.mark_saved("torch_0003");
        log.record_deletion("goblin_base_0002");

        assert!(log.is_saved("torch_0003"));
        assert!(log.is_deleted("goblin_base_0002"));
        assert!(!log.is_deleted("torch_0003"));

        log.forget("torch_0003");
        assert!(!log.is_saved("torch_0003"));
        // Forgetting an unknown id is a no-op.
        log.forget("torch_0003");
    }
}
