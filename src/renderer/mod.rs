//! Rendering contract
//!
//! The crate never owns a window. A frontend implements [`Canvas`] and
//! [`render_scene`] pushes every live body through it once per frame.

pub mod viewport;

pub use viewport::Viewport;

use crate::sim::{Color, Scene};

/// Drawing surface supplied by a frontend
pub trait Canvas {
    /// Window size in pixels
    fn size(&self) -> (u32, u32);
    fn clear(&mut self);
    /// Fill a polygon given in screen pixels
    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Color);
    fn present(&mut self);
}

/// Clear, draw every live body in insertion order, then present
pub fn render_scene(canvas: &mut impl Canvas, viewport: &Viewport, scene: &Scene) {
    let size = canvas.size();
    canvas.clear();
    let mut points = Vec::new();
    for (shape, color) in scene.drawables() {
        points.clear();
        points.extend(
            shape
                .vertices()
                .iter()
                .map(|v| viewport.to_screen(*v, size)),
        );
        canvas.fill_polygon(&points, color);
    }
    canvas.present();
}
