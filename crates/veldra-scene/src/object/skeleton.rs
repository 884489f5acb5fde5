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

//! Skeleton derivation: turns an object's vertex groups into a bone
//! forest with relative transforms.
//!
//! Bones live in a contiguous array and reference their father by index,
//! which keeps the structure trivially copyable; the build is fully
//! deterministic from the group data.

use veldra_core::math::Vec3;

use crate::object::mesh::Object3d;

/// A bone transform: translation plus per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonePose {
    /// Translation component.
    pub translation: Vec3,
    /// Per-axis scale component.
    pub scale: Vec3,
}

impl Default for BonePose {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// A node in the bone forest.
///
/// `father`, when present, always refers to a bone derived from an earlier
/// group, so the forest can never contain a cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bone {
    /// Index of the father bone, or `None` for a root.
    pub father: Option<usize>,
    /// The rest pose, with translation relative to the father.
    pub init: BonePose,
    /// The animated pose, with absolute translation.
    pub anim: BonePose,
    /// The rest translation relative to the father, kept verbatim for pose
    /// reconstruction.
    pub init_global_translation: Vec3,
}

/// An object's bone forest. Owned one-to-one by its object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    /// The bones, one per vertex group (or a single root).
    pub bones: Vec<Bone>,
}

/// Finds the nearest group at or before `start` that lists `origin` among
/// its members.
fn father_of(object: &Object3d, origin: u32, start: usize) -> Option<usize> {
    for i in (0..=start).rev() {
        if object.groups[i].indexes.contains(&origin) {
            return Some(i);
        }
    }
    None
}

/// Derives the skeleton for `object` from its vertex groups.
///
/// With no groups, a single root bone owns every vertex. Otherwise one
/// bone is created per group; assignment proceeds in reverse group order
/// so a vertex shared between overlapping groups is claimed by the
/// last-declared (innermost) one, and any vertex claimed by no group falls
/// to bone 0. Also fills the per-vertex local offsets used for pose
/// reconstruction.
pub fn build(object: &mut Object3d) {
    let mut skeleton = Skeleton::default();

    if object.groups.is_empty() {
        skeleton.bones.resize(1, Bone::default());
        object.bone_vertices = vec![Vec::new(); 1];

        for i in 0..object.vertices.len() {
            object.bone_vertices[0].push(i as u32);
        }

        skeleton.bones[0].father = None;
        skeleton.bones[0].anim.scale = Vec3::ONE;
    } else {
        skeleton.bones.resize(object.groups.len(), Bone::default());
        object.bone_vertices = vec![Vec::new(); object.groups.len()];

        // One bone per vertex group; vertices go to the inner-most group.
        let mut vertex_assigned = vec![false; object.vertices.len()];
        for i in (0..object.groups.len()).rev() {
            for j in 0..object.groups[i].indexes.len() {
                let index = object.groups[i].indexes[j];
                if !vertex_assigned[index as usize] {
                    vertex_assigned[index as usize] = true;
                    object.bone_vertices[i].push(index);
                }
            }

            let origin = object.groups[i].origin;
            skeleton.bones[i].anim.translation = object.vertices[origin as usize].pos;
            skeleton.bones[i].father = if i == 0 {
                None
            } else {
                father_of(object, origin, i - 1)
            };
            skeleton.bones[i].anim.scale = Vec3::ONE;
        }

        // Vertices claimed by no group fall to the root bone.
        for (index, assigned) in vertex_assigned.iter().enumerate() {
            if !assigned {
                object.bone_vertices[0].push(index as u32);
            }
        }

        // Relative bone translations.
        for i in 0..skeleton.bones.len() {
            let relative = match skeleton.bones[i].father {
                Some(father) => {
                    skeleton.bones[i].anim.translation
                        - skeleton.bones[father].anim.translation
                }
                None => skeleton.bones[i].anim.translation,
            };
            skeleton.bones[i].init.translation = relative;
            skeleton.bones[i].init_global_translation = relative;
        }
    }

    // Relative vertex positions.
    object.vertex_local = vec![Vec3::ZERO; object.vertices.len()];
    for (bone, vertices) in skeleton.bones.iter().zip(&object.bone_vertices) {
        for &index in vertices {
            object.vertex_local[index as usize] =
                object.vertices[index as usize].pos - bone.anim.translation;
        }
    }

    object.skeleton = Some(skeleton);
}

/// Drops the derived skeleton data from `object`.
///
/// A no-op when no skeleton was built.
pub fn clear(object: &mut Object3d) {
    if object.skeleton.is_none() {
        return;
    }
    object.skeleton = None;
    object.bone_vertices.clear();
    object.vertex_local.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::mesh::{Face, Vertex, VertexGroup};
    use approx::assert_relative_eq;

    fn object_with_groups(positions: &[Vec3], groups: Vec<VertexGroup>) -> Object3d {
        Object3d::from_parts(
            "npc/test",
            positions.iter().copied().map(Vertex::at).collect(),
            vec![Face::new(0, 1, 2)],
            groups,
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn no_groups_yields_single_root_owning_everything() {
        let object = object_with_groups(
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            Vec::new(),
        );

        let skeleton = object.skeleton.as_ref().unwrap();
        assert_eq!(skeleton.bones.len(), 1);
        assert_eq!(skeleton.bones[0].father, None);
        assert_eq!(object.bone_vertices[0], vec![0, 1, 2]);
    }

    #[test]
    fn single_group_with_unclaimed_vertices() {
        // One group "chest" claiming 3 of 5 vertices; the 2 unclaimed
        // vertices fall to bone 0 (the same bone here).
        let object = object_with_groups(
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(2.0, 2.0, 0.0),
                Vec3::new(3.0, 3.0, 0.0),
            ],
            vec![VertexGroup::new("chest", 0, vec![0, 1, 2])],
        );

        let skeleton = object.skeleton.as_ref().unwrap();
        assert_eq!(skeleton.bones.len(), 1);
        assert_eq!(skeleton.bones[0].father, None);
        assert_eq!(object.bone_vertices[0], vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn overlapping_groups_claim_in_reverse_declaration_order() {
        // Vertex 1 is in both groups; the later-declared group wins.
        let object = object_with_groups(
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
            ],
            vec![
                VertexGroup::new("torso", 0, vec![0, 1]),
                VertexGroup::new("arm", 1, vec![1, 2]),
            ],
        );

        assert_eq!(object.bone_vertices[0], vec![0]);
        assert_eq!(object.bone_vertices[1], vec![1, 2]);
    }

    #[test]
    fn father_is_nearest_preceding_group_listing_the_origin() {
        let object = object_with_groups(
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(3.0, 0.0, 0.0),
            ],
            vec![
                VertexGroup::new("torso", 0, vec![0, 1]),
                VertexGroup::new("arm", 1, vec![1, 2]),
                VertexGroup::new("hand", 2, vec![2, 3]),
            ],
        );

        let skeleton = object.skeleton.as_ref().unwrap();
        // "hand" origin (vertex 2) is listed by "arm"; "arm" origin
        // (vertex 1) is listed by "torso"; "torso" origin has no enclosing
        // group.
        assert_eq!(skeleton.bones[2].father, Some(1));
        assert_eq!(skeleton.bones[1].father, Some(0));
        assert_eq!(skeleton.bones[0].father, None);
    }

    #[test]
    fn relative_translations_subtract_the_father() {
        let object = object_with_groups(
            &[
                Vec3::new(0.0, 10.0, 0.0),
                Vec3::new(0.0, 15.0, 0.0),
                Vec3::new(0.0, 18.0, 0.0),
            ],
            vec![
                VertexGroup::new("torso", 0, vec![0, 1]),
                VertexGroup::new("head", 1, vec![1, 2]),
            ],
        );

        let skeleton = object.skeleton.as_ref().unwrap();
        assert_relative_eq!(skeleton.bones[0].init.translation.y, 10.0);
        assert_relative_eq!(skeleton.bones[1].init.translation.y, 5.0);
        assert_relative_eq!(skeleton.bones[1].init_global_translation.y, 5.0);
    }

    #[test]
    fn vertex_local_offsets_are_relative_to_owning_bone() {
        let object = object_with_groups(
            &[
                Vec3::new(0.0, 10.0, 0.0),
                Vec3::new(1.0, 12.0, 0.0),
                Vec3::new(5.0, 5.0, 5.0),
            ],
            vec![VertexGroup::new("chest", 0, vec![0, 1])],
        );

        // Vertices 0 and 1 are relative to the bone at vertex 0; vertex 2
        // is unclaimed, falls to bone 0, and shares its reference frame.
        assert_eq!(object.vertex_local[0], Vec3::ZERO);
        assert_eq!(object.vertex_local[1], Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(object.vertex_local[2], Vec3::new(5.0, -5.0, 5.0));
    }

    #[test]
    fn rebuild_from_copy_is_deterministic() {
        let object = object_with_groups(
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(3.0, 0.0, 0.0),
            ],
            vec![
                VertexGroup::new("torso", 0, vec![0, 1, 2]),
                VertexGroup::new("arm", 1, vec![1, 2, 3]),
            ],
        );

        let copy = object.duplicate();
        assert_eq!(object.skeleton, copy.skeleton);
        assert_eq!(object.bone_vertices, copy.bone_vertices);
        assert_eq!(object.vertex_local, copy.vertex_local);
    }

    #[test]
    fn clear_drops_derived_data() {
        let mut object = object_with_groups(
            &[Vec3::ZERO, Vec3::ONE, Vec3::new(2.0, 0.0, 0.0)],
            Vec::new(),
        );
        clear(&mut object);
        assert!(object.skeleton.is_none());
        assert!(object.bone_vertices.is_empty());
        assert!(object.vertex_local.is_empty());
        // Clearing twice is a no-op.
        clear(&mut object);
    }
}
