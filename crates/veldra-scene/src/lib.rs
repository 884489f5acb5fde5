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

//! # Veldra Scene
//!
//! The 3D object model: mesh data with named vertex groups, action points
//! and selections, the skeleton derivation pipeline that turns vertex
//! groups into a bone forest, linked-object edges, and the simplified
//! physics-box representation used for free-flying debris.

#![warn(missing_docs)]

pub mod error;
pub mod object;
pub mod physics;
pub mod texture;

pub use error::ObjectError;
pub use object::{
    ActionPoint, Face, FaceFlags, GroupHandle, LinkedEdge, Object3d, Selection, SelectionHandle,
    Vertex, VertexGroup,
};
pub use object::{Bone, BonePose, Skeleton};
pub use physics::{CollisionCylinder, PhysicsBox};
pub use texture::TextureSlot;
