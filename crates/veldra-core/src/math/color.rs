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

//! Defines the `Color3` color type used for halos and tint colors.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// An RGB color with `f32` components.
///
/// `#[repr(C)]` ensures a consistent memory layout for interop with vertex
/// streams.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Color3 {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
}

impl Color3 {
    /// Opaque white (`[1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0]`).
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// Opaque blue (`[0.0, 0.0, 1.0]`).
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new `Color3` with explicit components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Mul<f32> for Color3 {
    type Output = Self;
    /// Scales each component by `rhs`.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
        }
    }
}
