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

//! The reference-counted animation resource manager.
//!
//! Animation resources are keyed by name and shared across entities;
//! acquiring an already-loaded name bumps its count, releasing is
//! idempotent for dead handles.

/// Handle to a shared animation resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimHandle(u32);

#[derive(Debug)]
struct AnimResource {
    name: String,
    refs: u32,
}

/// Name-keyed, reference-counted animation resources.
#[derive(Debug, Default)]
pub struct AnimationManager {
    slots: Vec<Option<AnimResource>>,
}

impl AnimationManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires a handle to the resource named `name`, loading it on first
    /// use and bumping the reference count otherwise.
    pub fn acquire(&mut self, name: &str) -> AnimHandle {
        if let Some(index) = self.slots.iter().position(|slot| {
            slot.as_ref().is_some_and(|resource| resource.name == name)
        }) {
            if let Some(resource) = &mut self.slots[index] {
                resource.refs += 1;
            }
            return AnimHandle(index as u32);
        }

        let resource = AnimResource {
            name: name.to_owned(),
            refs: 1,
        };
        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                self.slots[index] = Some(resource);
                AnimHandle(index as u32)
            }
            None => {
                self.slots.push(Some(resource));
                AnimHandle((self.slots.len() - 1) as u32)
            }
        }
    }

    /// Releases one reference to `handle`, unloading the resource when the
    /// count reaches zero. Releasing a dead handle is a no-op.
    pub fn release(&mut self, handle: AnimHandle) {
        let Some(slot) = self.slots.get_mut(handle.0 as usize) else {
            return;
        };
        let Some(resource) = slot else {
            return;
        };
        resource.refs -= 1;
        if resource.refs == 0 {
            log::trace!("unloading animation '{}'", resource.name);
            *slot = None;
        }
    }

    /// The current reference count for `name`, zero when not loaded.
    pub fn ref_count(&self, name: &str) -> u32 {
        self.slots
            .iter()
            .flatten()
            .find(|resource| resource.name == name)
            .map_or(0, |resource| resource.refs)
    }

    /// Whether `handle` refers to a loaded resource.
    pub fn is_live(&self, handle: AnimHandle) -> bool {
        self.slots
            .get(handle.0 as usize)
            .is_some_and(Option::is_some)
    }
}
