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

//! Error types for object-model construction.

/// An error raised while assembling an [`crate::Object3d`] from raw mesh
/// data.
///
/// Construction-level failures are fatal to that object only; the caller
/// treats the object as absent.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// The mesh contains no vertices.
    #[error("mesh '{file}' has no vertices")]
    EmptyMesh {
        /// The resource path of the offending mesh.
        file: String,
    },
    /// A face references a vertex index outside the vertex list.
    #[error("mesh '{file}' face {face} references vertex {vertex} out of {count}")]
    FaceIndexOutOfRange {
        /// The resource path of the offending mesh.
        file: String,
        /// The face index.
        face: usize,
        /// The out-of-range vertex index.
        vertex: u32,
        /// The number of vertices in the mesh.
        count: usize,
    },
    /// A vertex group's origin vertex is outside the vertex list.
    #[error("mesh '{file}' group '{group}' origin {origin} out of {count}")]
    GroupOriginOutOfRange {
        /// The resource path of the offending mesh.
        file: String,
        /// The group name.
        group: String,
        /// The out-of-range origin vertex index.
        origin: u32,
        /// The number of vertices in the mesh.
        count: usize,
    },
}
