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

//! Euler-angle orientation for entities.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// An orientation expressed as pitch/yaw/roll Euler angles, in **degrees**.
///
/// Entity orientations are authored and scripted in degrees; conversion to
/// radians happens only at the trigonometry boundary.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize, Encode, Decode,
)]
pub struct Angle {
    pitch: f32,
    yaw: f32,
    roll: f32,
}

impl Angle {
    /// The identity orientation.
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    /// Creates a new angle triple from degrees.
    #[inline]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Returns the pitch in degrees.
    #[inline]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Returns the yaw in degrees.
    #[inline]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Returns the roll in degrees.
    #[inline]
    pub const fn roll(&self) -> f32 {
        self.roll
    }

    /// Sets the pitch in degrees.
    #[inline]
    pub fn set_pitch(&mut self, degrees: f32) {
        self.pitch = degrees;
    }

    /// Sets the yaw in degrees.
    #[inline]
    pub fn set_yaw(&mut self, degrees: f32) {
        self.yaw = degrees;
    }

    /// Sets the roll in degrees.
    #[inline]
    pub fn set_roll(&mut self, degrees: f32) {
        self.roll = degrees;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_update_components() {
        let mut angle = Angle::ZERO;
        angle.set_pitch(15.0);
        angle.set_yaw(270.0);
        angle.set_roll(-5.0);
        assert_eq!(angle, Angle::new(15.0, 270.0, -5.0));
    }
}
