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

//! Provides geometric primitive shapes for spatial calculations.

use super::{Vec2, Vec3};

/// Represents an Axis-Aligned Bounding Box (AABB).
///
/// An AABB is a rectangular prism aligned with the coordinate axes, defined
/// by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Aabb {
    /// The corner of the box with the smallest coordinates on all axes.
    pub min: Vec3,
    /// The corner of the box with the largest coordinates on all axes.
    pub max: Vec3,
}

impl Aabb {
    /// An invalid `Aabb` where `min` components are positive infinity and
    /// `max` are negative infinity.
    ///
    /// Useful as a neutral starting point for merging operations.
    pub const INVALID: Self = Self {
        min: Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
        max: Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// A degenerate `Aabb` collapsed onto the world origin.
    pub const ZERO: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    /// Creates a new `Aabb` from two corner points.
    ///
    /// Ensures `min` holds the component-wise minimum and `max` the
    /// component-wise maximum regardless of argument order.
    #[inline]
    pub fn from_min_max(min_pt: Vec3, max_pt: Vec3) -> Self {
        Self {
            min: Vec3::new(
                min_pt.x.min(max_pt.x),
                min_pt.y.min(max_pt.y),
                min_pt.z.min(max_pt.z),
            ),
            max: Vec3::new(
                min_pt.x.max(max_pt.x),
                min_pt.y.max(max_pt.y),
                min_pt.z.max(max_pt.z),
            ),
        }
    }

    /// Creates an `Aabb` that tightly encloses a given set of points.
    ///
    /// Returns `None` if the input slice is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut aabb = Self::INVALID;
        for point in points {
            aabb.merge_point(*point);
        }
        Some(aabb)
    }

    /// Expands the box to contain `point`.
    #[inline]
    pub fn merge_point(&mut self, point: Vec3) {
        self.min = Vec3::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Vec3::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }

    /// Returns the center point of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the size of the box along each axis.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

impl Default for Aabb {
    /// Returns [`Aabb::ZERO`].
    fn default() -> Self {
        Self::ZERO
    }
}

/// A 2D screen-space bounding rectangle.
///
/// Used for the projected footprint of an entity on screen. A box with
/// `max` components below `min` components marks the entity as currently
/// off-screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBox {
    /// The top-left corner in screen coordinates.
    pub min: Vec2,
    /// The bottom-right corner in screen coordinates.
    pub max: Vec2,
}

impl ScreenBox {
    /// The sentinel "not on screen" rectangle.
    pub const OFFSCREEN: Self = Self {
        min: Vec2::new(-1.0, -1.0),
        max: Vec2::new(-1.0, -1.0),
    };

    /// Creates a new screen box from two corners.
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }
}

impl Default for ScreenBox {
    /// Returns [`ScreenBox::OFFSCREEN`].
    fn default() -> Self {
        Self::OFFSCREEN
    }
}
