//! Collision detection for convex polygons
//!
//! Two phases: a cheap bounding-box reject, then the Separating Axis Theorem
//! over the edge normals of both shapes. Boundaries are closed, so shapes that
//! only touch along an edge or at a corner count as colliding.

use super::polygon::Polygon;
use super::vector::{self, Vector2};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Whether the shapes intersect (touching included)
    pub collided: bool,
    /// Always 0.0 in results from `find_collision`. The SAT sweep measures
    /// overlap only to choose the axis; it is not meant for position correction.
    pub overlap: f64,
    /// Unit axis of minimum overlap, pointing from the first shape toward the second
    pub axis: Vector2,
}

impl CollisionInfo {
    pub fn miss() -> Self {
        Self {
            collided: false,
            overlap: 0.0,
            axis: Vector2::ZERO,
        }
    }
}

/// Closed 1-D interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Overlap length if the closed intervals intersect
    ///
    /// Touching intervals report `Some(0.0)`.
    pub fn overlap(&self, other: &Interval) -> Option<f64> {
        if self.min <= other.max && other.min <= self.max {
            Some(self.max.min(other.max) - self.min.max(other.min))
        } else {
            None
        }
    }
}

/// Project every vertex onto `axis` and keep the extremes
fn project(shape: &Polygon, axis: Vector2) -> Interval {
    shape.vertices().iter().fold(
        Interval {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        },
        |acc, v| {
            let p = v.dot(axis);
            Interval {
                min: acc.min.min(p),
                max: acc.max.max(p),
            }
        },
    )
}

/// Bounding-box broad phase
fn bounds_overlap(shape1: &Polygon, shape2: &Polygon) -> bool {
    let b1 = shape1.bounding_box();
    let b2 = shape2.bounding_box();
    let x1 = Interval { min: b1.min.x, max: b1.max.x };
    let x2 = Interval { min: b2.min.x, max: b2.max.x };
    let y1 = Interval { min: b1.min.y, max: b1.max.y };
    let y2 = Interval { min: b2.min.y, max: b2.max.y };
    x1.overlap(&x2).is_some() && y1.overlap(&y2).is_some()
}

/// Smallest-overlap axis found among one shape's edge normals
#[derive(Debug, Clone, Copy)]
struct Sweep {
    overlap: f64,
    axis: Vector2,
}

/// Test every edge normal of `edges_of` as a separating axis.
///
/// Returns `None` as soon as one axis separates the shapes.
fn sweep_axes(edges_of: &Polygon, other: &Polygon) -> Option<Sweep> {
    let mut best = Sweep {
        overlap: f64::INFINITY,
        axis: Vector2::ZERO,
    };
    for (start, end) in edges_of.edges() {
        let edge = end - start;
        if edge.length_squared() == 0.0 {
            // Duplicate vertex; no direction to test
            continue;
        }
        let normal = vector::right_normal(edge).normalize();
        let overlap = project(edges_of, normal).overlap(&project(other, normal))?;
        if overlap < best.overlap {
            best = Sweep {
                overlap,
                axis: normal,
            };
        }
    }
    Some(best)
}

/// Check whether two convex, counterclockwise polygons intersect
///
/// Cost is O(V1 * V2): every vertex of both shapes is projected onto every
/// edge normal of both shapes.
pub fn find_collision(shape1: &Polygon, shape2: &Polygon) -> CollisionInfo {
    if !bounds_overlap(shape1, shape2) {
        return CollisionInfo::miss();
    }
    let Some(sweep1) = sweep_axes(shape1, shape2) else {
        return CollisionInfo::miss();
    };
    let Some(sweep2) = sweep_axes(shape2, shape1) else {
        return CollisionInfo::miss();
    };

    // Shape 2's outward normals point back toward shape 1
    let mut axis = if sweep1.overlap < sweep2.overlap {
        sweep1.axis
    } else {
        -sweep2.axis
    };
    if axis.dot(shape2.vertex_mean() - shape1.vertex_mean()) < 0.0 {
        axis = -axis;
    }

    CollisionInfo {
        collided: true,
        overlap: 0.0,
        axis,
    }
}
