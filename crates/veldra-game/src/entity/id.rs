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

//! Entity identity: class path plus instance number.

use veldra_core::EntityInstance;

/// The immutable identity of an entity.
///
/// The class path names the asset/behavior family (its last segment is the
/// class name); the instance number distinguishes entities of the same
/// class. The concatenation of class name and zero-padded instance is the
/// globally unique string identifier used by the save system and scripts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    class_path: String,
    instance: EntityInstance,
    string: String,
}

impl EntityId {
    /// Creates an identity from a class path and instance number.
    pub fn new(class_path: impl Into<String>, instance: EntityInstance) -> Self {
        let class_path = class_path.into();
        let string = format!("{}_{:04}", class_name(&class_path), instance);
        Self {
            class_path,
            instance,
            string,
        }
    }

    /// The full class (template) path.
    pub fn class_path(&self) -> &str {
        &self.class_path
    }

    /// The last segment of the class path.
    pub fn class_name(&self) -> &str {
        class_name(&self.class_path)
    }

    /// The instance number within the class family.
    pub fn instance(&self) -> EntityInstance {
        self.instance
    }

    /// The unique string identifier, `<class-name>_<instance>`.
    pub fn string(&self) -> &str {
        &self.string
    }

    /// The per-instance asset path: the class path's parent directory
    /// joined with the string identifier.
    pub fn instance_path(&self) -> String {
        match self.class_path.rsplit_once('/') {
            Some((parent, _)) => format!("{}/{}", parent, self.string),
            None => self.string.clone(),
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.string)
    }
}

fn class_name(class_path: &str) -> &str {
    class_path.rsplit('/').next().unwrap_or(class_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_identifier_is_class_name_plus_padded_instance() {
        let id = EntityId::new("graph/interactive/npc/goblin_base/goblin_base", 12);
        assert_eq!(id.class_name(), "goblin_base");
        assert_eq!(id.string(), "goblin_base_0012");
    }

    #[test]
    fn instance_path_replaces_the_last_segment() {
        let id = EntityId::new("graph/interactive/items/torch/torch", 3);
        assert_eq!(
            id.instance_path(),
            "graph/interactive/items/torch/torch_0003"
        );
    }

    #[test]
    fn bare_class_path_has_no_parent() {
        let id = EntityId::new("noname", 0);
        assert_eq!(id.string(), "noname_0000");
        assert_eq!(id.instance_path(), "noname_0000");
    }
}
