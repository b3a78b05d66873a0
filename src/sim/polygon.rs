//! Convex polygon geometry
//!
//! A polygon is an ordered loop of vertices in counterclockwise order; edge `i`
//! runs from vertex `i` to vertex `(i + 1) % n`. Bodies own their polygon and
//! move it by mutating the vertices in place.

use serde::{Deserialize, Serialize};

use super::error::PhysicsError;
use super::vector::{self, Vector2};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector2,
    pub max: Vector2,
}

impl Aabb {
    /// Extent along x and y
    pub fn size(&self) -> Vector2 {
        self.max - self.min
    }
}

/// A closed counter-clockwise loop of at least three vertices with non-zero area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vector2>", into = "Vec<Vector2>")]
pub struct Polygon {
    vertices: Vec<Vector2>,
}

impl Polygon {
    /// Build a polygon, rejecting fewer than 3 vertices, a zero/non-finite area or
    /// clockwise winding
    pub fn new(vertices: Vec<Vector2>) -> Result<Self, PhysicsError> {
        if vertices.len() < 3 {
            return Err(PhysicsError::TooFewVertices {
                count: vertices.len(),
            });
        }
        let polygon = Self { vertices };
        let area = polygon.area();
        if area == 0.0 || !area.is_finite() {
            return Err(PhysicsError::DegeneratePolygon { area });
        }
        if area < 0.0 {
            return Err(PhysicsError::ClockwisePolygon { area });
        }
        Ok(polygon)
    }

    #[cfg(test)]
    pub(crate) fn from_vertices_unchecked(vertices: Vec<Vector2>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over edges as `(start, end)` vertex pairs, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (Vector2, Vector2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Signed shoelace area; positive for counterclockwise winding
    pub fn area(&self) -> f64 {
        self.edges().map(|(a, b)| vector::cross(a, b)).sum::<f64>() / 2.0
    }

    /// Area-weighted centroid
    pub fn centroid(&self) -> Vector2 {
        let area = self.area();
        let (sum_x, sum_y) = self.edges().fold((0.0, 0.0), |(sx, sy), (a, b)| {
            let cross = vector::cross(a, b);
            (sx + (a.x + b.x) * cross, sy + (a.y + b.y) * cross)
        });
        Vector2::new(sum_x / (6.0 * area), sum_y / (6.0 * area))
    }

    /// Plain average of the vertices. Cheaper than `centroid` and used for
    /// orienting collision axes.
    pub fn vertex_mean(&self) -> Vector2 {
        self.vertices.iter().copied().sum::<Vector2>() / self.vertices.len() as f64
    }

    /// Move every vertex by `delta`
    pub fn translate(&mut self, delta: Vector2) {
        for v in &mut self.vertices {
            *v += delta;
        }
    }

    /// Rotate every vertex counterclockwise by `angle` radians about `pivot`
    pub fn rotate(&mut self, angle: f64, pivot: Vector2) {
        for v in &mut self.vertices {
            *v = vector::rotate(*v - pivot, angle) + pivot;
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        let mut min = Vector2::splat(f64::INFINITY);
        let mut max = Vector2::splat(f64::NEG_INFINITY);
        for v in &self.vertices {
            min = min.min(*v);
            max = max.max(*v);
        }
        Aabb { min, max }
    }
}

impl TryFrom<Vec<Vector2>> for Polygon {
    type Error = PhysicsError;

    fn try_from(vertices: Vec<Vector2>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

impl From<Polygon> for Vec<Vector2> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn square(half: f64) -> Polygon {
        Polygon::new(vec![
            Vector2::new(-half, -half),
            Vector2::new(half, -half),
            Vector2::new(half, half),
            Vector2::new(-half, half),
        ])
        .unwrap()
    }

    fn triangle_345() -> Polygon {
        Polygon::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(4.0, 0.0),
            Vector2::new(4.0, 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_square_area_and_centroid() {
        let sq = square(1.0);
        assert_eq!(sq.area(), 4.0);
        assert!(sq.centroid().abs_diff_eq(Vector2::ZERO, 1e-12));
    }

    #[test]
    fn test_triangle_area_and_centroid() {
        let tri = triangle_345();
        assert!((tri.area() - 6.0).abs() < 1e-12);
        assert!(tri.centroid().abs_diff_eq(Vector2::new(8.0 / 3.0, 1.0), 1e-12));
    }

    #[test]
    fn test_rejects_clockwise() {
        let mut vertices = square(1.0).vertices().to_vec();
        vertices.reverse();
        let err = Polygon::new(vertices.clone()).unwrap_err();
        assert_eq!(err, PhysicsError::ClockwisePolygon { area: -4.0 });

        // Signed area and centroid of the raw loop
        let cw = Polygon::from_vertices_unchecked(vertices);
        assert_eq!(cw.area(), -4.0);
        assert!(cw.centroid().abs_diff_eq(Vector2::ZERO, 1e-12));
    }

    #[test]
    fn test_rejects_too_few_vertices() {
        let err = Polygon::new(vec![Vector2::ZERO, Vector2::X]).unwrap_err();
        assert_eq!(err, PhysicsError::TooFewVertices { count: 2 });
    }

    #[test]
    fn test_rejects_collinear() {
        let err = Polygon::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(2.0, 2.0),
        ])
        .unwrap_err();
        assert!(matches!(err, PhysicsError::DegeneratePolygon { .. }));
    }

    #[test]
    fn test_translate_moves_centroid() {
        let mut tri = triangle_345();
        tri.translate(Vector2::new(-1.0, 2.0));
        assert!(tri.centroid().abs_diff_eq(Vector2::new(5.0 / 3.0, 3.0), 1e-12));
    }

    #[test]
    fn test_rotate_about_centroid_keeps_centroid() {
        let mut tri = triangle_345();
        let c = tri.centroid();
        tri.rotate(1.1, c);
        assert!(tri.centroid().abs_diff_eq(c, 1e-9));
        assert!((tri.area() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let mut sq = square(1.0);
        sq.rotate(FRAC_PI_2, Vector2::new(1.0, 1.0));
        // (-1,-1) about (1,1) by 90° lands at (3,-1)
        assert!(sq.vertices()[0].abs_diff_eq(Vector2::new(3.0, -1.0), 1e-12));

        sq.rotate(-FRAC_PI_2, Vector2::new(1.0, 1.0));
        assert!(sq.vertices()[0].abs_diff_eq(Vector2::new(-1.0, -1.0), 1e-12));

        let mut full = square(2.0);
        full.rotate(2.0 * PI, Vector2::new(5.0, 5.0));
        for (a, b) in full.vertices().iter().zip(square(2.0).vertices()) {
            assert!(a.abs_diff_eq(*b, 1e-9));
        }
    }

    #[test]
    fn test_bounding_box() {
        let bb = triangle_345().bounding_box();
        assert_eq!(bb.min, Vector2::new(0.0, 0.0));
        assert_eq!(bb.max, Vector2::new(4.0, 3.0));
        assert_eq!(bb.size(), Vector2::new(4.0, 3.0));
    }

    #[test]
    fn test_edges_include_closing_edge() {
        let edges: Vec<_> = triangle_345().edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2], (Vector2::new(4.0, 3.0), Vector2::new(0.0, 0.0)));
    }

    #[test]
    fn test_serde_rejects_degenerate() {
        let json = serde_json::to_string(&square(1.0)).unwrap();
        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, square(1.0));

        let bad = "[[0.0,0.0],[1.0,0.0]]";
        assert!(serde_json::from_str::<Polygon>(bad).is_err());
    }

    proptest! {
        #[test]
        fn prop_translate_round_trip(
            dx in -1.0e4..1.0e4f64,
            dy in -1.0e4..1.0e4f64,
        ) {
            let original = triangle_345();
            let mut moved = original.clone();
            let delta = Vector2::new(dx, dy);
            moved.translate(delta);
            moved.translate(-delta);
            for (a, b) in moved.vertices().iter().zip(original.vertices()) {
                prop_assert!(a.abs_diff_eq(*b, 1e-9));
            }
        }
    }
}
