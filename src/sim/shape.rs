//! Polygon builders and preset game bodies
//!
//! Every builder emits vertices in counterclockwise order, centered on
//! `center`.

use std::f64::consts::{PI, TAU};

use super::body::{Body, BodyInfo, BodyKind, PowerUpKind};
use super::color::Color;
use super::error::PhysicsError;
use super::polygon::Polygon;
use super::vector::{self, Vector2};
use crate::consts::CIRCLE_SEGMENTS;

/// Axis-aligned rectangle with size `dims`
pub fn rectangle(center: Vector2, dims: Vector2) -> Result<Polygon, PhysicsError> {
    let h = dims / 2.0;
    let mut p = Polygon::new(vec![
        Vector2::new(-h.x, -h.y),
        Vector2::new(h.x, -h.y),
        Vector2::new(h.x, h.y),
        Vector2::new(-h.x, h.y),
    ])?;
    p.translate(center);
    Ok(p)
}

/// Star with `points` tips at `radius`; inner corners sit at half the radius
///
/// The first tip points straight up.
pub fn star(points: usize, center: Vector2, radius: f64) -> Result<Polygon, PhysicsError> {
    let step = TAU / points as f64;
    let tip = Vector2::new(0.0, radius);
    let inner_angle = PI / 2.0 + PI / points as f64;
    let notch = Vector2::new(inner_angle.cos(), inner_angle.sin()) * (radius / 2.0);

    let vertices = (0..points)
        .flat_map(|i| {
            let angle = step * i as f64;
            [vector::rotate(tip, angle), vector::rotate(notch, angle)]
        })
        .map(|v| v + center)
        .collect();
    Polygon::new(vertices)
}

/// Circle approximated by `segments` evenly spaced vertices
pub fn circle(center: Vector2, radius: f64, segments: usize) -> Result<Polygon, PhysicsError> {
    regular_polygon(segments, center, radius)
}

/// Regular polygon with its first vertex on the +x axis
pub fn regular_polygon(
    sides: usize,
    center: Vector2,
    radius: f64,
) -> Result<Polygon, PhysicsError> {
    let vertices = (0..sides)
        .map(|i| {
            let theta = TAU * i as f64 / sides as f64;
            center + Vector2::new(theta.cos(), theta.sin()) * radius
        })
        .collect();
    Polygon::new(vertices)
}

fn ball(
    kind: BodyKind,
    center: Vector2,
    radius: f64,
    mass: f64,
    color: Color,
    lives: u32,
) -> Result<Body, PhysicsError> {
    Body::with_info(
        circle(center, radius, CIRCLE_SEGMENTS)?,
        mass,
        color,
        BodyInfo::new(kind, lives),
    )
}

/// Player star
pub fn player(
    points: usize,
    center: Vector2,
    radius: f64,
    mass: f64,
    color: Color,
    lives: u32,
) -> Result<Body, PhysicsError> {
    Body::with_info(
        star(points, center, radius)?,
        mass,
        color,
        BodyInfo::new(BodyKind::Player, lives),
    )
}

/// Immovable three-pointed hazard
pub fn spike(center: Vector2, radius: f64, color: Color) -> Result<Body, PhysicsError> {
    Body::with_info(
        star(3, center, radius)?,
        f64::INFINITY,
        color,
        BodyInfo::new(BodyKind::Spike, 0),
    )
}

/// Immovable block the player can stand on
///
/// A trigger platform tells the game to spawn the next batch once it is gone.
pub fn platform(
    center: Vector2,
    dims: Vector2,
    color: Color,
    lives: u32,
    trigger: bool,
) -> Result<Body, PhysicsError> {
    let kind = if trigger {
        BodyKind::PlatformTrigger
    } else {
        BodyKind::Platform
    };
    Body::with_info(
        rectangle(center, dims)?,
        f64::INFINITY,
        color,
        BodyInfo::new(kind, lives),
    )
}

pub fn point(center: Vector2, radius: f64, mass: f64, color: Color) -> Result<Body, PhysicsError> {
    ball(BodyKind::Point, center, radius, mass, color, 0)
}

pub fn gravity_ball(
    center: Vector2,
    radius: f64,
    mass: f64,
    color: Color,
) -> Result<Body, PhysicsError> {
    ball(BodyKind::GravityBall, center, radius, mass, color, 0)
}

pub fn moving_ball(
    center: Vector2,
    radius: f64,
    mass: f64,
    color: Color,
    lives: u32,
) -> Result<Body, PhysicsError> {
    ball(BodyKind::MovingBall, center, radius, mass, color, lives)
}

/// Five-pointed star carrying a status effect
pub fn power_up(
    kind: PowerUpKind,
    center: Vector2,
    radius: f64,
    mass: f64,
    color: Color,
) -> Result<Body, PhysicsError> {
    Body::with_info(
        star(5, center, radius)?,
        mass,
        color,
        BodyInfo::new(BodyKind::PowerUp(kind), 0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle() {
        let r = rectangle(Vector2::new(3.0, 4.0), Vector2::new(4.0, 2.0)).unwrap();
        assert!((r.area() - 8.0).abs() < 1e-12);
        assert!(r.centroid().abs_diff_eq(Vector2::new(3.0, 4.0), 1e-12));
        let bb = r.bounding_box();
        assert_eq!(bb.min, Vector2::new(1.0, 3.0));
        assert_eq!(bb.max, Vector2::new(5.0, 5.0));
    }

    #[test]
    fn test_flat_rectangle_rejected() {
        let err = rectangle(Vector2::ZERO, Vector2::new(4.0, 0.0)).unwrap_err();
        assert!(matches!(err, PhysicsError::DegeneratePolygon { .. }));
    }

    #[test]
    fn test_star_layout() {
        let s = star(5, Vector2::new(1.0, 1.0), 4.0).unwrap();
        assert_eq!(s.len(), 10);
        assert!(s.area() > 0.0);
        assert!(s.vertices()[0].abs_diff_eq(Vector2::new(1.0, 5.0), 1e-12));
        for (i, v) in s.vertices().iter().enumerate() {
            let r = (*v - Vector2::new(1.0, 1.0)).length();
            let expected = if i % 2 == 0 { 4.0 } else { 2.0 };
            assert!((r - expected).abs() < 1e-12);
        }
        assert!(s.centroid().abs_diff_eq(Vector2::new(1.0, 1.0), 1e-9));
    }

    #[test]
    fn test_circle_approximates_area() {
        let c = circle(Vector2::ZERO, 10.0, CIRCLE_SEGMENTS).unwrap();
        assert_eq!(c.len(), CIRCLE_SEGMENTS);
        assert!((c.area() - PI * 100.0).abs() / (PI * 100.0) < 1e-2);
    }

    #[test]
    fn test_too_few_sides_rejected() {
        let err = regular_polygon(2, Vector2::ZERO, 1.0).unwrap_err();
        assert_eq!(err, PhysicsError::TooFewVertices { count: 2 });
    }

    #[test]
    fn test_presets() {
        let p = player(5, Vector2::ZERO, 10.0, 2.0, Color::BLUE, 3).unwrap();
        assert_eq!(p.kind(), BodyKind::Player);
        assert_eq!(p.info().lives, 3);
        assert_eq!(p.mass(), 2.0);

        let s = spike(Vector2::ZERO, 5.0, Color::RED).unwrap();
        assert!(s.is_static());
        assert_eq!(s.shape().len(), 6);

        let t = platform(Vector2::ZERO, Vector2::new(40.0, 4.0), Color::GREEN, 1, true).unwrap();
        assert_eq!(t.kind(), BodyKind::PlatformTrigger);
        assert!(t.is_static());

        let u = power_up(PowerUpKind::Invincibility, Vector2::ZERO, 3.0, 1.0, Color::YELLOW)
            .unwrap();
        assert_eq!(u.kind(), BodyKind::PowerUp(PowerUpKind::Invincibility));

        let b = moving_ball(Vector2::ZERO, 3.0, 1.0, Color::WHITE, 2).unwrap();
        assert_eq!(b.kind(), BodyKind::MovingBall);
        assert_eq!(b.info().lives, 2);
    }
}
