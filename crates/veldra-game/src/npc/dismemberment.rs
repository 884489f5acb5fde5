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

//! The dismemberment engine.
//!
//! NPC meshes carry `cut_*` selections marking severable regions. A hit
//! close enough to an eligible region hides that region's faces on the
//! original mesh, records the cut in the NPC's persistent mask, and spawns
//! a free-flying severed-part entity built from the region's geometry plus
//! the gore-tagged faces around it.

use rand::Rng;

use veldra_core::math::{degrees_to_radians, square, Vec3};
use veldra_core::EntityHandle;

use crate::config::DismemberConfig;
use crate::entity::{EntityFlags, EntityKind, EntityObject, ItemData, NpcData};
use crate::npc::CutFlags;
use crate::world::World;
use veldra_scene::{
    CollisionCylinder, FaceFlags, Object3d, PhysicsBox, Selection, SelectionHandle, Vertex,
};

/// The sample played when a part comes off.
const DISMEMBER_SFX: &str = "sfx/dismember";

/// Maps a `cut_*` selection name to its region bit.
///
/// `cut_rarm` maps through [`DismemberConfig::right_arm_flag`]; the legacy
/// default is the head bit. Unknown names map to no bit, which later makes
/// the cut a no-op.
pub fn cut_flag_for_name(name: &str, config: &DismemberConfig) -> CutFlags {
    match name {
        "cut_head" => CutFlags::HEAD,
        "cut_torso" => CutFlags::TORSO,
        "cut_larm" => CutFlags::LEFT_ARM,
        "cut_rarm" => config.right_arm_flag.flag(),
        "cut_lleg" => CutFlags::LEFT_LEG,
        "cut_rleg" => CutFlags::RIGHT_LEG,
        _ => CutFlags::NONE,
    }
}

/// The non-empty selection carrying the faces of a region bit.
fn selection_for_flag(object: &Object3d, flag: CutFlags) -> Option<SelectionHandle> {
    let name = if flag == CutFlags::HEAD {
        "cut_head"
    } else if flag == CutFlags::TORSO {
        "cut_torso"
    } else if flag == CutFlags::LEFT_ARM {
        "cut_larm"
    } else if flag == CutFlags::RIGHT_ARM {
        "cut_rarm"
    } else if flag == CutFlags::LEFT_LEG {
        "cut_lleg"
    } else if flag == CutFlags::RIGHT_LEG {
        "cut_rleg"
    } else {
        return None;
    };

    object
        .selections
        .iter()
        .position(|sel| !sel.selected.is_empty() && sel.name == name)
        .map(SelectionHandle)
}

/// The texture slot carrying the severed-surface material, if any.
fn gore_texture(object: &Object3d) -> Option<usize> {
    object.textures.iter().position(|slot| slot.is_gore())
}

/// A torso cut takes the head and both arms with it; their individual bits
/// become redundant and are dropped from the mask.
fn recompute_cut_flags(cuts: &mut CutFlags) {
    if cuts.contains(CutFlags::TORSO) {
        cuts.remove(CutFlags::HEAD);
        cuts.remove(CutFlags::LEFT_ARM);
        cuts.remove(CutFlags::RIGHT_ARM);
    }
}

/// Whether `flag`'s region is already gone, directly or because the torso
/// it hangs from is.
fn is_already_cut(cuts: CutFlags, flag: CutFlags) -> bool {
    if cuts.contains(flag) {
        return true;
    }
    if cuts.contains(CutFlags::TORSO) {
        return flag == CutFlags::HEAD || flag == CutFlags::LEFT_ARM || flag == CutFlags::RIGHT_ARM;
    }
    false
}

/// Whether `vertex` sits within `near` of any vertex of `sel`, in model
/// space.
fn is_near_selection(object: &Object3d, vertex: u32, sel: &Selection, near: f32) -> bool {
    let pos = object.vertices[vertex as usize].pos;
    sel.selected
        .iter()
        .any(|&member| object.vertices[member as usize].pos.distance(pos) < near)
}

/// Re-applies the hide-flags for every region in `npc.cuts` to `object`.
///
/// All hide-flags are cleared first, so the mask is the single source of
/// truth. Returns whether any visible non-gore face was newly hidden.
fn apply_cuts(npc: &mut NpcData, object: &mut Object3d) -> bool {
    if npc.cuts.is_empty() {
        return false;
    }

    recompute_cut_flags(&mut npc.cuts);

    let gore = gore_texture(object);

    for face in &mut object.faces {
        face.flags.remove(FaceFlags::HIDDEN);
    }

    let mut hid = false;
    for bit in 0..6 {
        let flag = CutFlags::from_bits(1 << bit);
        if !npc.cuts.contains(flag) {
            continue;
        }
        let Some(handle) = selection_for_flag(object, flag) else {
            continue;
        };

        let selected = object.selections[handle.0].selected.clone();
        for face in &mut object.faces {
            if face.vertex_ids.iter().any(|vid| selected.contains(vid)) {
                if !face.flags.contains(FaceFlags::HIDDEN) && face.texture != gore {
                    hid = true;
                }
                face.flags |= FaceFlags::HIDDEN;
            }
        }

        npc.cut_applied = true;
    }

    hid
}

/// Tries to sever the cut region of `target` nearest to `impact`.
///
/// Eligibility per region: not already cut (a torso cut supersedes head
/// and both arms), fewer than the configured number of already-hidden
/// non-gore faces, and the region's first vertex strictly under the
/// configured distance from the impact point. On success the region's
/// faces are hidden, the cut is recorded on the NPC payload, the dismember
/// sound plays and a severed part is launched.
///
/// Returns whether a region was severed.
pub fn try_cut(world: &mut World, target: EntityHandle, impact: Vec3) -> bool {
    let config = world.config.dismember;

    let Some(record) = world.entities.get(target) else {
        return false;
    };
    if record.kind.npc().is_none() || record.flags.contains(EntityFlags::NO_GORE) {
        return false;
    }
    let Some(object) = record.object() else {
        return false;
    };
    let cuts = record.kind.npc().map(|npc| npc.cuts).unwrap_or_default();
    let gore = gore_texture(object);

    let mut nearest: Option<(SelectionHandle, f32)> = None;
    for (i, sel) in object.selections.iter().enumerate() {
        if sel.selected.is_empty() || !sel.name.contains("cut_") {
            continue;
        }

        let flag = cut_flag_for_name(&sel.name, &config);
        if is_already_cut(cuts, flag) {
            continue;
        }

        let mut hidden = 0u32;
        for face in &object.faces {
            if face.texture == gore {
                continue;
            }
            if face.vertex_ids.iter().any(|vid| sel.selected.contains(vid))
                && face.flags.contains(FaceFlags::HIDDEN)
            {
                hidden += 1;
            }
        }
        if hidden >= config.max_hidden_faces {
            continue;
        }

        let first = sel.selected[0] as usize;
        let dist2 = impact.distance_squared(object.vertex_world[first]);
        if nearest.map_or(true, |(_, best)| dist2 < best) {
            nearest = Some((SelectionHandle(i), dist2));
        }
    }

    let Some((selection, dist2)) = nearest else {
        return false; // Nothing to cut...
    };
    if dist2 >= square(config.max_cut_distance) {
        return false; // can only cut a close part
    }

    let name = object.selections[selection.0].name.clone();
    let flag = cut_flag_for_name(&name, &config);

    let hid = match world.entities.get_mut(target) {
        Some(record) => match (&mut record.kind, &mut record.object) {
            (EntityKind::Npc(npc), Some(EntityObject::Owned(object)))
                if flag != CutFlags::NONE && !npc.cuts.contains(flag) =>
            {
                npc.cuts |= flag;
                apply_cuts(npc, object)
            }
            _ => false,
        },
        None => false,
    };

    if !hid {
        return false;
    }

    let pos = world
        .entities
        .get(target)
        .map(|record| record.pos)
        .unwrap_or(Vec3::ZERO);
    world.sounds.play_at(DISMEMBER_SFX, pos);
    spawn_severed_part(world, target, selection);

    true
}

/// Re-applies the hide-flags for every NPC with a non-zero cuts mask,
/// after the meshes were reloaded.
pub fn restore_cuts(world: &mut World) {
    for record in world.entities.iter_mut() {
        if let (EntityKind::Npc(npc), Some(EntityObject::Owned(object))) =
            (&mut record.kind, &mut record.object)
        {
            if !npc.cuts.is_empty() {
                apply_cuts(npc, object);
            }
        }
    }
}

/// Builds a free-standing entity from the geometry of `selection` on
/// `source` and launches it.
///
/// The part takes the selection's vertices plus the gore faces adjacent to
/// them, re-based on the part's own origin vertex. A physics box must be
/// derivable from the part; otherwise the whole spawn is a silent no-op
/// and no entity is registered.
fn spawn_severed_part(
    world: &mut World,
    source: EntityHandle,
    selection: SelectionHandle,
) -> Option<EntityHandle> {
    let config = world.config.dismember;

    let record = world.entities.get(source)?;
    let from = record.object()?;
    let sel = from.selections.get(selection.0)?;
    if sel.selected.is_empty() {
        return None;
    }

    let gore = gore_texture(from);

    // Selection vertices first, re-based on the source position; gore
    // faces near the selection contribute theirs afterwards. `equival`
    // maps source vertex ids to part vertex ids for face remapping.
    let mut vertices: Vec<Vertex> = Vec::with_capacity(sel.selected.len());
    let mut equival: Vec<Option<u32>> = vec![None; from.vertices.len()];
    for (k, &vid) in sel.selected.iter().enumerate() {
        equival[vid as usize] = Some(k as u32);
        let mut vertex = from.vertices[vid as usize];
        vertex.pos = from.vertex_world[vid as usize] - record.pos;
        vertices.push(vertex);
    }
    let spawn_vertex = *sel.selected.last()?;

    for face in &from.faces {
        if face.texture == gore
            && face
                .vertex_ids
                .iter()
                .any(|&vid| is_near_selection(from, vid, sel, config.near_selection_distance))
        {
            for &vid in &face.vertex_ids {
                equival[vid as usize] = Some(vertices.len() as u32);
                let mut vertex = from.vertices[vid as usize];
                vertex.pos = from.vertex_world[vid as usize] - record.pos;
                vertices.push(vertex);
            }
        }
    }

    // The part's origin is its highest vertex; everything is re-based on
    // it so the part pivots around that point in flight.
    let mut origin = 0usize;
    let mut top = vertices[0].pos.y;
    for (k, vertex) in vertices.iter().enumerate().skip(1) {
        if vertex.pos.y > top {
            top = vertex.pos.y;
            origin = k;
        }
    }
    let base = vertices[origin].pos;
    for vertex in &mut vertices {
        vertex.pos -= base;
    }

    // Faces survive only when all three vertices were carried over.
    let mut faces = Vec::new();
    for face in &from.faces {
        let mapped = [
            equival[face.vertex_ids[0] as usize],
            equival[face.vertex_ids[1] as usize],
            equival[face.vertex_ids[2] as usize],
        ];
        if let [Some(a), Some(b), Some(c)] = mapped {
            let mut carried = *face;
            carried.vertex_ids = [a, b, c];
            carried.flags.remove(FaceFlags::HIDDEN);
            if carried.texture == gore {
                carried.flags |= FaceFlags::DOUBLE_SIDED;
            }
            faces.push(carried);
        }
    }

    let part_file = format!("{}:{}", from.file, sel.name);
    let textures = from.textures.clone();
    let spawn_pos = from.vertex_world[spawn_vertex as usize];
    let source_halo = record.halo;
    let infra_color = record.infra_color * 0.8;

    let mut part = match Object3d::from_parts(
        part_file,
        vertices,
        faces,
        Vec::new(),
        Vec::new(),
        Vec::new(),
        textures,
    ) {
        Ok(part) => part,
        Err(err) => {
            log::debug!("severed part discarded: {err}");
            return None;
        }
    };
    part.origin = origin as u32;

    let Some(mut pbox) = PhysicsBox::from_object(&part) else {
        log::debug!("severed part discarded, no physics box: {}", part.file);
        return None;
    };

    let mut rng = rand::thread_rng();
    let pitch = rng.gen_range(340.0..380.0f32);
    let yaw = rng.gen_range(0.0..360.0f32);

    let direction = Vec3::new(
        -degrees_to_radians(yaw).sin(),
        degrees_to_radians(pitch).sin() * 2.0,
        degrees_to_radians(yaw).cos(),
    )
    .normalize();
    pbox.launch(spawn_pos, direction);
    part.physics = Some(pbox);

    let cylinder = CollisionCylinder::from_object(&part);

    let part_handle = world.spawn("noname", 0);
    if let Some(io) = world.entities.get_mut(part_handle) {
        io.kind = EntityKind::Item(ItemData::default());
        io.flags = EntityFlags::MOVABLE
            | EntityFlags::NO_SAVE
            | EntityFlags::NO_PHYS_COLLISION
            | EntityFlags::GORE_EXPLODE;
        io.script_spawned = true;
        io.infra_color = infra_color;
        io.halo = source_halo;
        io.pos = spawn_pos;
        io.last_pos = spawn_pos;
        io.initial_pos = spawn_pos;
        io.angle.set_pitch(pitch);
        io.angle.set_yaw(yaw);
        io.angle.set_roll(0.0);
        io.rubber = 0.6;
        io.no_collide = Some(source);
        io.cylinder = cylinder;
        io.object = Some(EntityObject::Owned(Box::new(part)));
    }

    Some(part_handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::npc::CutRegion;
    use veldra_scene::{Face, TextureSlot};

    #[test]
    fn unknown_cut_names_map_to_no_flag() {
        let config = DismemberConfig::default();
        assert_eq!(cut_flag_for_name("cut_tail", &config), CutFlags::NONE);
        assert_eq!(cut_flag_for_name("cut_head", &config), CutFlags::HEAD);
    }

    #[test]
    fn right_arm_mapping_follows_the_config() {
        let legacy = DismemberConfig::default();
        assert_eq!(cut_flag_for_name("cut_rarm", &legacy), CutFlags::HEAD);

        let fixed = DismemberConfig {
            right_arm_flag: CutRegion::RightArm,
            ..DismemberConfig::default()
        };
        assert_eq!(cut_flag_for_name("cut_rarm", &fixed), CutFlags::RIGHT_ARM);
    }

    #[test]
    fn torso_supersedes_head_and_arms() {
        let cuts = CutFlags::TORSO;
        assert!(is_already_cut(cuts, CutFlags::HEAD));
        assert!(is_already_cut(cuts, CutFlags::LEFT_ARM));
        assert!(is_already_cut(cuts, CutFlags::RIGHT_ARM));
        assert!(!is_already_cut(cuts, CutFlags::LEFT_LEG));
        assert!(!is_already_cut(cuts, CutFlags::NONE));
    }

    #[test]
    fn recompute_drops_redundant_bits_under_torso() {
        let mut cuts = CutFlags::TORSO | CutFlags::HEAD | CutFlags::LEFT_LEG;
        recompute_cut_flags(&mut cuts);
        assert_eq!(cuts, CutFlags::TORSO | CutFlags::LEFT_LEG);
    }

    #[test]
    fn apply_cuts_hides_selection_faces_and_reports_new_hides() {
        let mut object = Object3d::from_parts(
            "npc/goblin",
            vec![
                Vertex::at(Vec3::new(0.0, 0.0, 0.0)),
                Vertex::at(Vec3::new(1.0, 0.0, 0.0)),
                Vertex::at(Vec3::new(0.0, 1.0, 0.0)),
                Vertex::at(Vec3::new(2.0, 2.0, 0.0)),
                Vertex::at(Vec3::new(3.0, 2.0, 0.0)),
                Vertex::at(Vec3::new(2.0, 3.0, 0.0)),
            ],
            vec![Face::textured(0, 1, 2, 0), Face::textured(3, 4, 5, 0)],
            Vec::new(),
            Vec::new(),
            vec![Selection {
                name: "cut_head".into(),
                selected: vec![0, 1, 2],
            }],
            vec![TextureSlot::new("npc_goblin_base")],
        )
        .unwrap();

        let mut npc = NpcData {
            cuts: CutFlags::HEAD,
            ..NpcData::default()
        };

        assert!(apply_cuts(&mut npc, &mut object));
        assert!(object.faces[0].flags.contains(FaceFlags::HIDDEN));
        assert!(!object.faces[1].flags.contains(FaceFlags::HIDDEN));
        assert!(npc.cut_applied);

        // Re-applying hides the same faces but nothing new.
        assert!(!apply_cuts(&mut npc, &mut object));
        assert!(object.faces[0].flags.contains(FaceFlags::HIDDEN));
    }

    #[test]
    fn legacy_rarm_cut_hides_the_head_selection() {
        // With the legacy mapping a cut_rarm hit records the head bit, so
        // the re-apply pass hides the cut_head region.
        let mut world = World::with_config(GameConfig::default());
        let npc = world.spawn("graph/interactive/npc/goblin/goblin", 1);

        let object = Object3d::from_parts(
            "npc/goblin",
            vec![
                Vertex::at(Vec3::new(0.0, 10.0, 0.0)),
                Vertex::at(Vec3::new(1.0, 10.0, 0.0)),
                Vertex::at(Vec3::new(0.0, 11.0, 0.0)),
                Vertex::at(Vec3::new(20.0, 0.0, 0.0)),
                Vertex::at(Vec3::new(21.0, 0.0, 0.0)),
                Vertex::at(Vec3::new(20.0, 1.0, 0.0)),
            ],
            vec![Face::textured(0, 1, 2, 0), Face::textured(3, 4, 5, 0)],
            Vec::new(),
            Vec::new(),
            vec![
                Selection {
                    name: "cut_head".into(),
                    selected: vec![0, 1, 2],
                },
                Selection {
                    name: "cut_rarm".into(),
                    selected: vec![3, 4, 5],
                },
            ],
            vec![TextureSlot::new("npc_goblin_base")],
        )
        .unwrap();

        {
            let record = world.entities.get_mut(npc).unwrap();
            record.kind = EntityKind::Npc(NpcData::default());
            record.object = Some(EntityObject::Owned(Box::new(object)));
        }

        // Strike next to the arm region.
        assert!(try_cut(&mut world, npc, Vec3::new(20.0, 0.0, 0.0)));

        let record = world.entities.get(npc).unwrap();
        let npc_data = record.kind.npc().unwrap();
        assert_eq!(npc_data.cuts, CutFlags::HEAD);
        let object = record.object().unwrap();
        assert!(object.faces[0].flags.contains(FaceFlags::HIDDEN));
        assert!(!object.faces[1].flags.contains(FaceFlags::HIDDEN));
    }
}
