//! Invariant violations surfaced by the simulation core

use super::scene::BodyId;

/// Errors raised when a shape, body or scene operation would break an invariant
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("polygon area must be finite and non-zero, got {area}")]
    DegeneratePolygon { area: f64 },
    #[error("polygon vertices must wind counter-clockwise, got signed area {area}")]
    ClockwisePolygon { area: f64 },
    #[error("body mass must be positive (infinity allowed), got {mass}")]
    InvalidMass { mass: f64 },
    #[error("body {0:?} is not in the scene")]
    UnknownBody(BodyId),
    #[error("viewport min corner must be strictly below and left of max corner")]
    InvalidViewport,
}
