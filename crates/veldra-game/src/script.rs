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

//! Opaque script data blocks attached to entities.
//!
//! The script interpreter is an external collaborator; entities only own
//! the program text and the per-entity event state it drives.

/// An opaque script program attached to an entity.
///
/// Releasing a script is dropping it; the entity keeps it in an `Option`
/// slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    /// Whether the program parsed and is runnable.
    pub valid: bool,
    /// The program text.
    pub data: String,
}

impl Script {
    /// Creates a runnable script from program text.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            valid: true,
            data: data.into(),
        }
    }
}

/// The event a script is currently driven by when idle.
///
/// Most entities loop their `main` event; cinematics swap in another one.
pub const MAIN_EVENT: &str = "main";
