//! World-to-screen mapping

use crate::sim::{PhysicsError, Vector2};

/// Rectangle of world space shown on screen
///
/// The world is scaled uniformly to fit the window, centered, and flipped so
/// that world +y points up the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: Vector2,
    /// Offset from the center to the top-right corner
    max_diff: Vector2,
}

impl Viewport {
    pub fn new(min: Vector2, max: Vector2) -> Result<Self, PhysicsError> {
        if !(min.x < max.x && min.y < max.y) {
            return Err(PhysicsError::InvalidViewport);
        }
        let center = (min + max) / 2.0;
        Ok(Self {
            center,
            max_diff: max - center,
        })
    }

    /// Pixels per world unit for a window of `size`
    pub fn scale(&self, size: (u32, u32)) -> f64 {
        let half_w = size.0 as f64 / 2.0;
        let half_h = size.1 as f64 / 2.0;
        (half_w / self.max_diff.x).min(half_h / self.max_diff.y)
    }

    /// Pixel position of `point` in a window of `size`
    pub fn to_screen(&self, point: Vector2, size: (u32, u32)) -> (i32, i32) {
        let half_w = size.0 as f64 / 2.0;
        let half_h = size.1 as f64 / 2.0;
        let offset = (point - self.center) * self.scale(size);
        (
            (half_w + offset.x).round() as i32,
            (half_h - offset.y).round() as i32,
        )
    }
}
