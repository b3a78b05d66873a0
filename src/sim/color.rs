//! Display colors

use rand::Rng;
use serde::{Deserialize, Serialize};

/// RGB color with each channel in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(0.95, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 0.95, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 0.95);
    pub const YELLOW: Color = Color::new(0.95, 0.95, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Uniformly random color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }

    /// Whether every channel lies in 0..=1
    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Channels scaled to 0..=255 for 8-bit renderers
    pub fn to_rgb8(&self) -> [u8; 3] {
        let scale = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [scale(self.r), scale(self.g), scale(self.b)]
    }
}
