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

//! Defines the mesh-side data structures of the object model.

use veldra_core::math::Vec3;
use veldra_core::EntityHandle;

use crate::error::ObjectError;
use crate::object::lookup::FastAccess;
use crate::object::skeleton::{self, Skeleton};
use crate::physics::PhysicsBox;
use crate::texture::TextureSlot;

/// A single mesh vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    /// Model-space position.
    pub pos: Vec3,
    /// Vertex normal.
    pub norm: Vec3,
}

impl Vertex {
    /// Creates a vertex at `pos` with a zero normal.
    #[inline]
    pub const fn at(pos: Vec3) -> Self {
        Self {
            pos,
            norm: Vec3::ZERO,
        }
    }
}

/// Per-face render/collision flags.
///
/// The same flag space is used for faces and for texture-slot surface
/// flags, since slot flags are stamped onto the faces using the slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FaceFlags {
    bits: u32,
}

impl FaceFlags {
    /// No flags.
    pub const NONE: Self = Self { bits: 0 };
    /// The face is not rendered or collided with (e.g. a severed region).
    pub const HIDDEN: Self = Self { bits: 1 << 0 };
    /// The face is rendered from both sides.
    pub const DOUBLE_SIDED: Self = Self { bits: 1 << 1 };
    /// The face is alpha-blended.
    pub const TRANSPARENT: Self = Self { bits: 1 << 2 };
    /// Water surface.
    pub const WATER: Self = Self { bits: 1 << 3 };
    /// Metallic surface.
    pub const METAL: Self = Self { bits: 1 << 4 };
    /// Climbable surface.
    pub const CLIMB: Self = Self { bits: 1 << 5 };
    /// Fall-through surface.
    pub const FALL: Self = Self { bits: 1 << 6 };
    /// Lava surface.
    pub const LAVA: Self = Self { bits: 1 << 7 };
    /// Excluded from collision.
    pub const NO_COLLIDE: Self = Self { bits: 1 << 8 };
    /// Mip-mapped late in the pipeline (character textures).
    pub const LATE_MIP: Self = Self { bits: 1 << 9 };

    /// Creates flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks whether all bits of `other` are set.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Clears the bits of `other`.
    pub fn remove(&mut self, other: Self) {
        self.bits &= !other.bits;
    }

    /// Checks if no flags are set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for FaceFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for FaceFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// A mesh triangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Face {
    /// Indices into the object's vertex list.
    pub vertex_ids: [u32; 3],
    /// Index into the object's texture list, if textured.
    pub texture: Option<usize>,
    /// Render/collision flags.
    pub flags: FaceFlags,
}

impl Face {
    /// Creates an untextured face over three vertex indices.
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            vertex_ids: [a, b, c],
            texture: None,
            flags: FaceFlags::NONE,
        }
    }

    /// Creates a face over three vertex indices using texture slot `slot`.
    pub const fn textured(a: u32, b: u32, c: u32, slot: usize) -> Self {
        Self {
            vertex_ids: [a, b, c],
            texture: Some(slot),
            flags: FaceFlags::NONE,
        }
    }
}

/// A named rigid subset of the mesh's vertices; the origin of one bone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexGroup {
    /// The group name.
    pub name: String,
    /// The vertex the bone derives its translation from.
    pub origin: u32,
    /// Member vertex indices.
    pub indexes: Vec<u32>,
}

impl VertexGroup {
    /// Creates a group named `name` with origin vertex `origin` and the
    /// given member indices.
    pub fn new(name: impl Into<String>, origin: u32, indexes: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            origin,
            indexes,
        }
    }
}

/// A named attachment marker on the mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionPoint {
    /// The marker name (e.g. `primary_attach`).
    pub name: String,
    /// The vertex the marker sits on.
    pub vertex: u32,
}

/// A named arbitrary vertex subset, used by effects such as cutting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// The selection name (e.g. `cut_head`).
    pub name: String,
    /// Selected vertex indices.
    pub selected: Vec<u32>,
}

/// Index of a vertex group within an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupHandle(pub usize);

/// Index of a selection within an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionHandle(pub usize);

/// An attachment edge from this object to another entity's object.
///
/// The child is referenced by its entity handle; resolving the handle (and
/// re-validating it) is the owner's responsibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkedEdge {
    /// The group of this object the child is attached to.
    pub group: GroupHandle,
    /// The vertex of this object the child hangs from.
    pub attach_vertex: u32,
    /// The attached entity.
    pub entity: EntityHandle,
}

/// A complete 3D object: mesh data plus the derived skeleton.
///
/// The skeleton is owned one-to-one by its object: copies rebuild their own
/// skeleton rather than sharing mutable bone pose data.
#[derive(Debug, Clone, Default)]
pub struct Object3d {
    /// The resource path this object was loaded from.
    pub file: String,
    /// The origin vertex index.
    pub origin: u32,
    /// The vertex list.
    pub vertices: Vec<Vertex>,
    /// Per-vertex world-space positions, updated by animation each frame.
    pub vertex_world: Vec<Vec3>,
    /// Per-vertex positions relative to the owning bone, filled by the
    /// skeleton build.
    pub vertex_local: Vec<Vec3>,
    /// The face list.
    pub faces: Vec<Face>,
    /// Named vertex groups.
    pub groups: Vec<VertexGroup>,
    /// Named attachment markers.
    pub actions: Vec<ActionPoint>,
    /// Named vertex subsets.
    pub selections: Vec<Selection>,
    /// Texture slots referenced by faces.
    pub textures: Vec<TextureSlot>,
    /// Attachment edges to other entities' objects.
    pub linked: Vec<LinkedEdge>,
    /// Precomputed well-known lookups.
    pub fast: FastAccess,
    /// The simplified physics representation, if one was created.
    pub physics: Option<PhysicsBox>,
    /// The derived bone forest.
    pub skeleton: Option<Skeleton>,
    /// Per-bone owned vertex indices, parallel to the skeleton's bones.
    pub bone_vertices: Vec<Vec<u32>>,
}

impl Object3d {
    /// Assembles an object from raw mesh data and derives its skeleton.
    ///
    /// Validates that the mesh is non-empty and that faces and group
    /// origins stay inside the vertex list; a violation is fatal to this
    /// object's construction only.
    pub fn from_parts(
        file: impl Into<String>,
        vertices: Vec<Vertex>,
        faces: Vec<Face>,
        groups: Vec<VertexGroup>,
        actions: Vec<ActionPoint>,
        selections: Vec<Selection>,
        textures: Vec<TextureSlot>,
    ) -> Result<Self, ObjectError> {
        let file = file.into();

        if vertices.is_empty() {
            return Err(ObjectError::EmptyMesh { file });
        }
        for (i, face) in faces.iter().enumerate() {
            for &vid in &face.vertex_ids {
                if vid as usize >= vertices.len() {
                    return Err(ObjectError::FaceIndexOutOfRange {
                        file,
                        face: i,
                        vertex: vid,
                        count: vertices.len(),
                    });
                }
            }
        }
        for group in &groups {
            if group.origin as usize >= vertices.len() {
                return Err(ObjectError::GroupOriginOutOfRange {
                    file,
                    group: group.name.clone(),
                    origin: group.origin,
                    count: vertices.len(),
                });
            }
        }

        let vertex_world = vertices.iter().map(|v| v.pos).collect();
        let mut object = Self {
            file,
            origin: 0,
            vertices,
            vertex_world,
            vertex_local: Vec::new(),
            faces,
            groups,
            actions,
            selections,
            textures,
            linked: Vec::new(),
            fast: FastAccess::default(),
            physics: None,
            skeleton: None,
            bone_vertices: Vec::new(),
        };
        skeleton::build(&mut object);
        object.precompute_fast_access();
        Ok(object)
    }

    /// Duplicates this object for an independent entity instance.
    ///
    /// Structural data is copied; the skeleton is rebuilt from the copied
    /// group data so bone pose state is never shared between instances.
    /// The physics box shape is carried over with its motion state reset.
    /// Linked edges are not carried over.
    pub fn duplicate(&self) -> Self {
        let mut copy = Self {
            file: self.file.clone(),
            origin: self.origin,
            vertices: self.vertices.clone(),
            vertex_world: vec![Vec3::ZERO; self.vertices.len()],
            vertex_local: Vec::new(),
            faces: self.faces.clone(),
            groups: self.groups.clone(),
            actions: self.actions.clone(),
            selections: self.selections.clone(),
            textures: self.textures.clone(),
            linked: Vec::new(),
            fast: self.fast.clone(),
            physics: None,
            skeleton: None,
            bone_vertices: Vec::new(),
        };

        skeleton::build(&mut copy);

        if let Some(physics) = &self.physics {
            copy.physics = Some(physics.duplicate_shape());
        }

        copy
    }

    /// Whether `vertex` belongs to the selection `handle`.
    pub fn is_in_selection(&self, handle: SelectionHandle, vertex: u32) -> bool {
        self.selections
            .get(handle.0)
            .is_some_and(|sel| sel.selected.contains(&vertex))
    }

    /// Attaches `entity`'s object to this object at `group`/`vertex`.
    pub fn link_child(&mut self, group: GroupHandle, attach_vertex: u32, entity: EntityHandle) {
        self.linked.push(LinkedEdge {
            group,
            attach_vertex,
            entity,
        });
    }

    /// Removes every attachment edge pointing at `entity`.
    ///
    /// A no-op when no such edge exists.
    pub fn unlink_child(&mut self, entity: EntityHandle) {
        self.linked.retain(|edge| edge.entity != entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> Vec<Vertex> {
        vec![
            Vertex::at(Vec3::new(0.0, 0.0, 0.0)),
            Vertex::at(Vec3::new(1.0, 0.0, 0.0)),
            Vertex::at(Vec3::new(1.0, 1.0, 0.0)),
            Vertex::at(Vec3::new(0.0, 1.0, 0.0)),
        ]
    }

    #[test]
    fn from_parts_rejects_empty_mesh() {
        let result = Object3d::from_parts(
            "item/empty",
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        assert!(matches!(result, Err(ObjectError::EmptyMesh { .. })));
    }

    #[test]
    fn from_parts_rejects_out_of_range_face() {
        let result = Object3d::from_parts(
            "item/bad",
            quad_vertices(),
            vec![Face::new(0, 1, 9)],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        assert!(matches!(
            result,
            Err(ObjectError::FaceIndexOutOfRange { vertex: 9, .. })
        ));
    }

    #[test]
    fn unlink_child_removes_all_edges_for_entity() {
        let mut obj = Object3d::from_parts(
            "npc/test",
            quad_vertices(),
            vec![Face::new(0, 1, 2)],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap();

        let child = EntityHandle::new(7);
        let other = EntityHandle::new(8);
        obj.link_child(GroupHandle(0), 0, child);
        obj.link_child(GroupHandle(0), 1, child);
        obj.link_child(GroupHandle(0), 2, other);

        obj.unlink_child(child);
        assert_eq!(obj.linked.len(), 1);
        assert_eq!(obj.linked[0].entity, other);

        // Unlinking again is a no-op.
        obj.unlink_child(child);
        assert_eq!(obj.linked.len(), 1);
    }
}
