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

//! Gameplay configuration, loaded from RON text.

use serde::{Deserialize, Serialize};

use crate::npc::CutRegion;

/// An error raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The RON text did not parse into a valid configuration.
    #[error("invalid game configuration: {0}")]
    InvalidFormat(String),
}

/// Tuning for the dismemberment engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismemberConfig {
    /// Maximum distance from the impact point to a region's first vertex
    /// for the region to be cuttable.
    pub max_cut_distance: f32,
    /// A region with at least this many already-hidden non-gore faces is
    /// treated as spent and skipped.
    pub max_hidden_faces: u32,
    /// Distance under which a vertex counts as adjacent to a cut region
    /// when gathering gore faces for the severed part.
    pub near_selection_distance: f32,
    /// The region bit a `cut_rarm` selection maps to.
    ///
    /// The legacy data maps it to [`CutRegion::Head`]; shipped content
    /// depends on that, so it stays the default. Set [`CutRegion::RightArm`]
    /// to give the right arm its own bit.
    pub right_arm_flag: CutRegion,
}

impl Default for DismemberConfig {
    fn default() -> Self {
        Self {
            max_cut_distance: 60.0,
            max_hidden_faces: 3,
            near_selection_distance: 8.0,
            right_arm_flag: CutRegion::Head,
        }
    }
}

/// Top-level gameplay configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Dismemberment tuning.
    pub dismember: DismemberConfig,
}

impl GameConfig {
    /// Parses a configuration from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        ron::de::from_bytes(text.as_bytes()).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_the_legacy_right_arm_mapping() {
        let config = GameConfig::default();
        assert_eq!(config.dismember.right_arm_flag, CutRegion::Head);
        assert_eq!(config.dismember.max_cut_distance, 60.0);
        assert_eq!(config.dismember.max_hidden_faces, 3);
    }

    #[test]
    fn partial_ron_falls_back_to_defaults() {
        let config = GameConfig::from_ron(
            "(dismember: (max_cut_distance: 80.0, right_arm_flag: RightArm))",
        )
        .unwrap();
        assert_eq!(config.dismember.max_cut_distance, 80.0);
        assert_eq!(config.dismember.right_arm_flag, CutRegion::RightArm);
        assert_eq!(config.dismember.max_hidden_faces, 3);
    }

    #[test]
    fn malformed_ron_is_an_error() {
        assert!(GameConfig::from_ron("(dismember: (max_cut_distance: ))").is_err());
    }
}
