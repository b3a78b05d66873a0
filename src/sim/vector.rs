//! 2D vector math
//!
//! `Vector2` is glam's `DVec2`; the helpers here cover the few operations the
//! physics code names differently from glam.

use glam::DVec2;

/// A 2D vector in world units
pub type Vector2 = DVec2;

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross(a: Vector2, b: Vector2) -> f64 {
    a.x * b.y - b.x * a.y
}

/// Rotate a vector counterclockwise by `angle` radians about the origin
#[inline]
pub fn rotate(v: Vector2, angle: f64) -> Vector2 {
    let (sin, cos) = angle.sin_cos();
    Vector2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Right-hand perpendicular `(y, -x)`; the outward normal of a CCW edge
#[inline]
pub fn right_normal(v: Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}
