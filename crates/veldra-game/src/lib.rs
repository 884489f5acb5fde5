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

//! # Veldra Game
//!
//! The entity lifecycle core: the entity record and its variant payloads,
//! the handle-indexed entity table, the world aggregate with its
//! subsystem registries, the reference-cleanup protocol executed on
//! destruction, inventories, and the dismemberment engine.
//!
//! Everything here runs on one logical simulation thread between frames;
//! no operation blocks on I/O.

#![warn(missing_docs)]

pub mod config;
pub mod entity;
pub mod inventory;
pub mod npc;
pub mod script;
pub mod world;

pub use config::{DismemberConfig, GameConfig};
pub use entity::{
    Entity, EntityFlags, EntityId, EntityKind, EntityManager, EntityObject, EntityState,
    ShowState,
};
pub use world::World;
