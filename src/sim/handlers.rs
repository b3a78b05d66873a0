//! Collision responses
//!
//! A [`CollisionHandler`] runs once when a [`CollisionCreator`][super::forces::CollisionCreator]
//! sees two bodies come into contact. Handlers never free bodies directly;
//! they flag them and the scene reaps them at the end of the tick.

use super::body::{Body, BodyKind, PowerUpKind};
use super::scene::{BodyId, World};
use super::vector::Vector2;

/// Response to two bodies touching
///
/// `axis` is the unit collision axis pointing from `body1` toward `body2`.
pub trait CollisionHandler {
    fn on_collision(&mut self, world: &mut World, body1: BodyId, body2: BodyId, axis: Vector2);
}

impl<F> CollisionHandler for F
where
    F: FnMut(&mut World, BodyId, BodyId, Vector2),
{
    fn on_collision(&mut self, world: &mut World, body1: BodyId, body2: BodyId, axis: Vector2) {
        self(world, body1, body2, axis)
    }
}

/// Reduced mass of a pair; an infinite mass defers to the other one
///
/// Returns `None` when both masses are infinite.
pub fn reduced_mass(m1: f64, m2: f64) -> Option<f64> {
    match (m1.is_infinite(), m2.is_infinite()) {
        (true, true) => None,
        (true, false) => Some(m2),
        (false, true) => Some(m1),
        (false, false) => Some(m1 * m2 / (m1 + m2)),
    }
}

/// Scalar impulse along `axis` that `body1` receives in a bounce with `body2`
pub fn collision_impulse(
    body1: &Body,
    body2: &Body,
    axis: Vector2,
    elasticity: f64,
) -> Option<f64> {
    let mr = reduced_mass(body1.mass(), body2.mass())?;
    let u1 = body1.velocity().dot(axis);
    let u2 = body2.velocity().dot(axis);
    Some(mr * (1.0 + elasticity) * (u2 - u1))
}

/// Take a life from `body`, or flag it for removal when it has none left.
/// Returns whether the body survives.
fn spend_life(body: &mut Body) -> bool {
    if body.info().lives == 0 {
        body.remove();
        log::debug!("Removed {:?} with no lives left", body.kind());
        false
    } else {
        body.info_mut().lives -= 1;
        log::debug!("{:?} lost a life, {} left", body.kind(), body.info().lives);
        true
    }
}

/// What a bounce does to the second body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Equal and opposite impulse
    Reciprocal,
    /// Removed outright
    RemoveTarget,
    /// Loses a life and bounces, or is removed with no lives left
    SpendTargetLife,
    /// Left untouched
    OneSided,
}

/// Impulse-based bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restitution {
    /// 0 is perfectly inelastic, 1 perfectly elastic
    pub elasticity: f64,
    pub impact: Impact,
}

impl CollisionHandler for Restitution {
    fn on_collision(&mut self, world: &mut World, body1: BodyId, body2: BodyId, axis: Vector2) {
        let Some((a, b)) = world.pair_mut(body1, body2) else {
            return;
        };
        let impulse = collision_impulse(a, b, axis, self.elasticity)
            .map_or(Vector2::ZERO, |j| axis * j);
        a.add_impulse(impulse);
        match self.impact {
            Impact::Reciprocal => b.add_impulse(-impulse),
            Impact::RemoveTarget => {
                b.remove();
                log::debug!("Removed {:?} on impact", b.kind());
            }
            Impact::SpendTargetLife => {
                if spend_life(b) {
                    b.add_impulse(-impulse);
                }
            }
            Impact::OneSided => {}
        }
    }
}

/// Which bodies a destructive collision removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyMode {
    Both,
    Target,
    /// Take a life from the target, removing it with none left
    TargetLife,
}

/// Removal without any impulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destroy {
    pub mode: DestroyMode,
}

impl Destroy {
    pub fn new(mode: DestroyMode) -> Self {
        Self { mode }
    }
}

impl CollisionHandler for Destroy {
    fn on_collision(&mut self, world: &mut World, body1: BodyId, body2: BodyId, _axis: Vector2) {
        if self.mode == DestroyMode::Both {
            if let Some(a) = world.body_mut(body1) {
                a.remove();
            }
        }
        let Some(b) = world.body_mut(body2) else {
            return;
        };
        match self.mode {
            DestroyMode::Both | DestroyMode::Target => {
                b.remove();
                log::debug!("Destroyed {:?}", b.kind());
            }
            DestroyMode::TargetLife => {
                spend_life(b);
            }
        }
    }
}

/// Removes the collected body and scores one point
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectPoint;

impl CollisionHandler for CollectPoint {
    fn on_collision(&mut self, world: &mut World, _body1: BodyId, body2: BodyId, _axis: Vector2) {
        let Some(point) = world.body_mut(body2) else {
            return;
        };
        if point.is_removed() {
            return;
        }
        point.remove();
        world.add_score(1);
        log::debug!("Point collected, score {}", world.score());
    }
}

/// Starts the status effect carried by a power-up body and consumes it
#[derive(Debug, Clone, Copy)]
pub struct ActivatePowerUp {
    /// Effect length in scene ticks
    pub duration: u32,
}

impl CollisionHandler for ActivatePowerUp {
    fn on_collision(&mut self, world: &mut World, _body1: BodyId, body2: BodyId, _axis: Vector2) {
        let kind = match world.body(body2).map(|b| (b.kind(), b.is_removed())) {
            Some((BodyKind::PowerUp(kind), false)) => kind,
            _ => return,
        };
        if let Some(power_up) = world.body_mut(body2) {
            power_up.remove();
        }
        let status = world.status_mut();
        match kind {
            PowerUpKind::Invincibility => status.activate_invincibility(self.duration),
            PowerUpKind::Expand => status.activate_expand(self.duration),
        }
        log::debug!("Activated {:?} for {} ticks", kind, self.duration);
    }
}
