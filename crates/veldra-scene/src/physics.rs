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

//! The simplified physics-box representation for free-flying objects.
//!
//! A box is a coarse particle cloud derived from the mesh bounds; the
//! actual integration is a collaborator concern, this crate only owns the
//! shape and its launch state.

use veldra_core::math::{Aabb, Vec3};

use crate::object::Object3d;

/// Initial speed imparted to a launched box, in world units per second.
const LAUNCH_SPEED: f32 = 250.0;

/// A coarse vertical cylinder used for entity-vs-world collision tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionCylinder {
    /// The cylinder base, at the entity's feet.
    pub origin: Vec3,
    /// Horizontal radius.
    pub radius: f32,
    /// Extent along the Y axis.
    pub height: f32,
}

impl CollisionCylinder {
    /// Derives a cylinder enclosing `object`'s mesh bounds.
    ///
    /// Returns `None` when the mesh carries no vertices.
    pub fn from_object(object: &Object3d) -> Option<Self> {
        let positions: Vec<Vec3> = object.vertices.iter().map(|v| v.pos).collect();
        let bounds = Aabb::from_points(&positions)?;
        let size = bounds.size();
        Some(Self {
            origin: Vec3::new(bounds.center().x, bounds.min.y, bounds.center().z),
            radius: (size.x.max(size.z)) * 0.5,
            height: size.y,
        })
    }
}

/// One particle of the simplified box shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxParticle {
    /// Rest offset from the box center.
    pub initial_offset: Vec3,
    /// Current world-space position.
    pub pos: Vec3,
    /// Current velocity.
    pub velocity: Vec3,
}

/// A coarse physical stand-in for an object: the bounds center, the eight
/// bound corners, and the six face centers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhysicsBox {
    /// The particle cloud (15 entries).
    pub particles: Vec<BoxParticle>,
    /// Bounding radius around the box center.
    pub radius: f32,
    /// Whether the box is currently simulated.
    pub active: bool,
    /// Number of consecutive rest frames; integration stops the box once
    /// this passes the solver's threshold.
    pub stop_count: u32,
}

impl PhysicsBox {
    /// Derives a box from `object`'s mesh bounds.
    ///
    /// Returns `None` when the mesh carries no vertices; the caller treats
    /// the operation it needed the box for as failed.
    pub fn from_object(object: &Object3d) -> Option<Self> {
        let positions: Vec<Vec3> = object.vertices.iter().map(|v| v.pos).collect();
        let bounds = match Aabb::from_points(&positions) {
            Some(bounds) => bounds,
            None => {
                log::debug!("physics box rejected, empty mesh: {}", object.file);
                return None;
            }
        };

        let center = bounds.center();
        let half = bounds.size() * 0.5;

        let mut offsets = Vec::with_capacity(15);
        offsets.push(Vec3::ZERO);
        for &sx in &[-1.0f32, 1.0] {
            for &sy in &[-1.0f32, 1.0] {
                for &sz in &[-1.0f32, 1.0] {
                    offsets.push(Vec3::new(half.x * sx, half.y * sy, half.z * sz));
                }
            }
        }
        offsets.push(Vec3::new(half.x, 0.0, 0.0));
        offsets.push(Vec3::new(-half.x, 0.0, 0.0));
        offsets.push(Vec3::new(0.0, half.y, 0.0));
        offsets.push(Vec3::new(0.0, -half.y, 0.0));
        offsets.push(Vec3::new(0.0, 0.0, half.z));
        offsets.push(Vec3::new(0.0, 0.0, -half.z));

        let radius = offsets
            .iter()
            .map(|offset| offset.length())
            .fold(0.0f32, f32::max);

        let particles = offsets
            .into_iter()
            .map(|offset| BoxParticle {
                initial_offset: offset,
                pos: center + offset,
                velocity: Vec3::ZERO,
            })
            .collect();

        Some(Self {
            particles,
            radius,
            active: false,
            stop_count: 0,
        })
    }

    /// Copies the shape for a duplicated object, resetting motion state.
    pub fn duplicate_shape(&self) -> Self {
        Self {
            particles: self
                .particles
                .iter()
                .map(|particle| BoxParticle {
                    initial_offset: particle.initial_offset,
                    pos: particle.initial_offset,
                    velocity: Vec3::ZERO,
                })
                .collect(),
            radius: self.radius,
            active: false,
            stop_count: 0,
        }
    }

    /// Puts the box at `origin` and launches it along `direction`.
    ///
    /// `direction` need not be normalized; a zero direction leaves the box
    /// at rest but still active.
    pub fn launch(&mut self, origin: Vec3, direction: Vec3) {
        let velocity = direction.normalize() * LAUNCH_SPEED;
        for particle in &mut self.particles {
            particle.pos = origin + particle.initial_offset;
            particle.velocity = velocity;
        }
        self.active = true;
        self.stop_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Face, Vertex};
    use approx::assert_relative_eq;

    fn cube_object() -> Object3d {
        let positions = [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ];
        Object3d::from_parts(
            "item/chunk",
            positions.into_iter().map(Vertex::at).collect(),
            vec![Face::new(0, 1, 2)],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn from_object_builds_fifteen_particles() {
        let pbox = PhysicsBox::from_object(&cube_object()).unwrap();
        assert_eq!(pbox.particles.len(), 15);
        assert!(!pbox.active);
        assert_relative_eq!(pbox.radius, (3.0f32).sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn from_object_rejects_empty_mesh() {
        assert!(PhysicsBox::from_object(&Object3d::default()).is_none());
    }

    #[test]
    fn launch_sets_uniform_velocity() {
        let mut pbox = PhysicsBox::from_object(&cube_object()).unwrap();
        pbox.stop_count = 9;
        pbox.launch(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));

        assert!(pbox.active);
        assert_eq!(pbox.stop_count, 0);
        for particle in &pbox.particles {
            assert_relative_eq!(particle.velocity.y, 250.0, epsilon = 1e-3);
            assert_relative_eq!(
                particle.pos.x,
                10.0 + particle.initial_offset.x,
                epsilon = 1e-5
            );
        }
    }
}
