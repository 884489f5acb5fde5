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

//! Name-based lookups over the object model, and the precomputed
//! fast-access table for well-known attachment points.

use veldra_core::math::Vec3;

use crate::object::mesh::{GroupHandle, Object3d, SelectionHandle};

/// Precomputed handles for names looked up on hot paths.
///
/// Rebuilt whenever the underlying group/selection/action-point lists
/// change.
#[derive(Debug, Clone, Default)]
pub struct FastAccess {
    /// The `view_attach` marker vertex.
    pub view_attach: Option<u32>,
    /// The `primary_attach` marker vertex.
    pub primary_attach: Option<u32>,
    /// The `left_attach` marker vertex.
    pub left_attach: Option<u32>,
    /// The `weapon_attach` marker vertex.
    pub weapon_attach: Option<u32>,
    /// The `secondary_attach` marker vertex.
    pub secondary_attach: Option<u32>,
    /// The `fire` marker vertex.
    pub fire: Option<u32>,
    /// The `head` vertex group.
    pub head_group: Option<GroupHandle>,
    /// The origin vertex of the `head` group.
    pub head_group_origin: Option<u32>,
    /// The `head` selection.
    pub sel_head: Option<SelectionHandle>,
    /// The `chest` selection.
    pub sel_chest: Option<SelectionHandle>,
    /// The `leggings` selection.
    pub sel_leggings: Option<SelectionHandle>,
}

impl Object3d {
    /// Finds a vertex group by name.
    pub fn group_by_name(&self, name: &str) -> Option<GroupHandle> {
        self.groups
            .iter()
            .position(|group| group.name == name)
            .map(GroupHandle)
    }

    /// Finds the origin vertex of the group named `name`.
    pub fn group_origin_by_name(&self, name: &str) -> Option<u32> {
        self.groups
            .iter()
            .find(|group| group.name == name)
            .map(|group| group.origin)
    }

    /// Finds a selection by name.
    pub fn selection_by_name(&self, name: &str) -> Option<SelectionHandle> {
        self.selections
            .iter()
            .position(|sel| sel.name == name)
            .map(SelectionHandle)
    }

    /// Finds an attachment marker's vertex by name.
    pub fn action_point_by_name(&self, name: &str) -> Option<u32> {
        self.actions
            .iter()
            .find(|action| action.name == name)
            .map(|action| action.vertex)
    }

    /// Finds the inner-most group listing `vertex`, scanning groups in
    /// reverse declaration order.
    pub fn group_of_vertex(&self, vertex: u32) -> Option<GroupHandle> {
        for i in (0..self.groups.len()).rev() {
            if self.groups[i].indexes.contains(&vertex) {
                return Some(GroupHandle(i));
            }
        }
        None
    }

    /// Finds the group owning the action point named `name`.
    pub fn group_of_action_point(&self, name: &str) -> Option<GroupHandle> {
        self.action_point_by_name(name)
            .and_then(|vertex| self.group_of_vertex(vertex))
    }

    /// Rebuilds the [`FastAccess`] table from the current name lists.
    pub fn precompute_fast_access(&mut self) {
        let mut fast = FastAccess {
            view_attach: self.action_point_by_name("view_attach"),
            primary_attach: self.action_point_by_name("primary_attach"),
            left_attach: self.action_point_by_name("left_attach"),
            weapon_attach: self.action_point_by_name("weapon_attach"),
            secondary_attach: self.action_point_by_name("secondary_attach"),
            fire: self.action_point_by_name("fire"),
            head_group: self.group_by_name("head"),
            head_group_origin: None,
            sel_head: self.selection_by_name("head"),
            sel_chest: self.selection_by_name("chest"),
            sel_leggings: self.selection_by_name("leggings"),
        };

        if let Some(head) = fast.head_group {
            fast.head_group_origin = Some(self.groups[head.0].origin);
        }

        self.fast = fast;
    }

    /// Re-centers the vertex list on the origin vertex.
    ///
    /// A no-op when the origin vertex already sits at the model-space
    /// origin; otherwise every vertex is shifted and a warning is logged,
    /// since authored assets are expected to arrive centered.
    pub fn center_on_origin(&mut self) {
        let offset = self.vertices[self.origin as usize].pos;
        if offset == Vec3::ZERO {
            return;
        }

        log::warn!("not centered: {}", self.file);

        for vertex in &mut self.vertices {
            vertex.pos -= offset;
        }
    }
}
