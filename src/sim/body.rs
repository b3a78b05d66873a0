//! Rigid bodies
//!
//! A body's position is implicit: it is the centroid of its polygon. Moving or
//! rotating a body rewrites the polygon's vertices.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::PhysicsError;
use super::polygon::Polygon;
use super::vector::Vector2;

/// Power-up categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Invincibility,
    Expand,
}

/// Body categories used by games to classify what they collide with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// No game meaning (walls, anchors, demo objects)
    #[default]
    Plain,
    Player,
    Platform,
    /// Platform whose disappearance tells the game to spawn the next batch
    PlatformTrigger,
    Spike,
    Point,
    GravityBall,
    MovingBall,
    PowerUp(PowerUpKind),
}

/// Game metadata carried by every body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BodyInfo {
    pub kind: BodyKind,
    /// Hits left before a life-counted collision removes the body
    pub lives: u32,
    /// Set while a collision rule holds this body in contact (e.g. resting on a platform)
    pub colliding: bool,
    /// Number of rules currently holding this body
    #[serde(default)]
    pub holds: u32,
}

impl BodyInfo {
    pub fn new(kind: BodyKind, lives: u32) -> Self {
        Self {
            kind,
            lives,
            colliding: false,
            holds: 0,
        }
    }

    /// Register one more rule holding this body in contact
    pub fn grab(&mut self) {
        self.holds += 1;
        self.colliding = true;
    }

    /// Drop one rule's hold; `colliding` clears once no rule holds the body
    pub fn release(&mut self) {
        self.holds = self.holds.saturating_sub(1);
        self.colliding = self.holds > 0;
    }
}

/// A simulated rigid object
#[derive(Debug, Clone)]
pub struct Body {
    shape: Polygon,
    mass: f64,
    velocity: Vector2,
    rotation: f64,
    force: Vector2,
    impulse: Vector2,
    color: Color,
    info: BodyInfo,
    removed: bool,
}

impl Body {
    /// Create a body at rest. `mass` must be positive; `f64::INFINITY` makes it immovable.
    pub fn new(shape: Polygon, mass: f64, color: Color) -> Result<Self, PhysicsError> {
        Self::with_info(shape, mass, color, BodyInfo::default())
    }

    pub fn with_info(
        shape: Polygon,
        mass: f64,
        color: Color,
        info: BodyInfo,
    ) -> Result<Self, PhysicsError> {
        // NaN fails this comparison too
        if !(mass > 0.0) {
            return Err(PhysicsError::InvalidMass { mass });
        }
        Ok(Self {
            shape,
            mass,
            velocity: Vector2::ZERO,
            rotation: 0.0,
            force: Vector2::ZERO,
            impulse: Vector2::ZERO,
            color,
            info,
            removed: false,
        })
    }

    #[inline]
    pub fn shape(&self) -> &Polygon {
        &self.shape
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Whether forces and impulses leave this body's velocity unchanged
    #[inline]
    pub fn is_static(&self) -> bool {
        self.mass.is_infinite()
    }

    #[inline]
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[inline]
    pub fn force(&self) -> Vector2 {
        self.force
    }

    #[inline]
    pub fn impulse(&self) -> Vector2 {
        self.impulse
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn info(&self) -> &BodyInfo {
        &self.info
    }

    #[inline]
    pub fn info_mut(&mut self) -> &mut BodyInfo {
        &mut self.info
    }

    #[inline]
    pub fn kind(&self) -> BodyKind {
        self.info.kind
    }

    pub fn centroid(&self) -> Vector2 {
        self.shape.centroid()
    }

    /// Move the body so its centroid lands on `centroid`
    pub fn set_centroid(&mut self, centroid: Vector2) {
        let delta = centroid - self.centroid();
        self.shape.translate(delta);
    }

    /// Shift the body without touching its velocity
    pub fn translate(&mut self, delta: Vector2) {
        self.shape.translate(delta);
    }

    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    /// Rotate to an absolute angle about the centroid
    pub fn set_rotation(&mut self, angle: f64) {
        let pivot = self.centroid();
        self.shape.rotate(angle - self.rotation, pivot);
        self.rotation = angle;
    }

    pub fn set_force(&mut self, force: Vector2) {
        self.force = force;
    }

    pub fn set_impulse(&mut self, impulse: Vector2) {
        self.impulse = impulse;
    }

    /// Accumulate a force for the next tick
    pub fn add_force(&mut self, force: Vector2) {
        self.force += force;
    }

    /// Accumulate an impulse for the next tick
    pub fn add_impulse(&mut self, impulse: Vector2) {
        self.impulse += impulse;
    }

    /// Change velocity directly by `acceleration * dt`, bypassing mass
    pub fn accelerate(&mut self, acceleration: Vector2, dt: f64) {
        self.velocity += acceleration * dt;
    }

    /// Clamp each velocity component to `[-max, max]`
    pub fn clamp_velocity(&mut self, max: f64) {
        self.velocity = self.velocity.clamp(Vector2::splat(-max), Vector2::splat(max));
    }

    /// Mirror the body to the other side when its centroid leaves `[-half_width, half_width]`
    pub fn wrap_horizontally(&mut self, half_width: f64) {
        let c = self.centroid();
        if c.x > half_width || c.x < -half_width {
            self.set_centroid(Vector2::new(-c.x, c.y));
        }
    }

    /// Flag the body for removal at the end of the current scene tick
    pub fn remove(&mut self) {
        self.removed = true;
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Integrate accumulated force and impulse over `dt`, then clear them
    ///
    /// The position update uses the average of the old and new velocity.
    pub fn tick(&mut self, dt: f64) {
        let before = self.velocity;
        if !self.is_static() {
            let total_impulse = self.impulse + self.force * dt;
            self.velocity = before + total_impulse / self.mass;
        }
        let average = (before + self.velocity) / 2.0;
        self.shape.translate(average * dt);
        self.force = Vector2::ZERO;
        self.impulse = Vector2::ZERO;
    }
}
