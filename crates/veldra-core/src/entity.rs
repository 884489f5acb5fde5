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

//! The stable entity handle used as a weak cross-subsystem reference.

use serde::{Deserialize, Serialize};

/// The instance number of an entity within its class (template) family.
pub type EntityInstance = u32;

/// A stable slot index into the entity table.
///
/// Handles are the only sanctioned way for one subsystem to refer to an
/// entity owned by the table: they stay cheap to copy and compare, and a
/// lookup through the table is always bounds- and liveness-checked.
///
/// A slot is reused after the entity occupying it is removed, so a handle
/// saved across a removal may alias a *different*, later entity. Callers
/// must re-validate handles through the table after any entity removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub(crate) u32);

impl EntityHandle {
    /// Creates a handle from a raw slot index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw slot index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_roundtrips_raw_index() {
        let handle = EntityHandle::new(42);
        assert_eq!(handle.index(), 42);
        assert_eq!(format!("{handle}"), "#42");
    }
}
