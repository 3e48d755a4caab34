use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::utils::math::hsv_to_rgb;

/// RGBA display color. Carried by bodies for the presentation layer; physics never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Rainbow cycle color for a hue angle in degrees.
    ///
    /// Each channel is `255 * sin²(θ + k·2π/3)`, so the three channels always
    /// sum to roughly 382 and the color never goes dark.
    pub fn rainbow(angle_degrees: f32) -> Self {
        let radians = angle_degrees.to_radians();
        let channel = |phase: f32| {
            let s = (radians + phase).sin();
            (255.0 * s * s) as u8
        };
        Self::rgb(
            channel(0.0),
            channel(2.0 * PI / 3.0),
            channel(4.0 * PI / 3.0),
        )
    }

    /// Bright color for a hue in degrees.
    pub fn from_hue(hue_degrees: f32) -> Self {
        let [r, g, b] = hsv_to_rgb(hue_degrees, 0.6, 1.0);
        Self::rgb(r, g, b)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}
