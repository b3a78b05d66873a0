//! Force laws and collision dispatch
//!
//! Every law here is a [`ForceCreator`] registered on a [`Scene`] together
//! with the bodies it reads, so it is retired automatically when one of them
//! is removed. The `create_*` functions build and register the common ones.

use super::body::Body;
use super::collision::{Interval, find_collision};
use super::error::PhysicsError;
use super::handlers::{
    ActivatePowerUp, CollectPoint, CollisionHandler, Destroy, DestroyMode, Impact, Restitution,
};
use super::scene::{BodyId, ForceCreator, Scene, World};
use super::vector::Vector2;

/// Newtonian attraction between two bodies
#[derive(Debug, Clone)]
pub struct Gravity {
    pub g: f64,
    /// Pairs at or inside this distance feel no force
    pub min_distance: f64,
    pub body1: BodyId,
    pub body2: BodyId,
}

impl ForceCreator for Gravity {
    fn apply(&mut self, world: &mut World) {
        let Some((b1, b2)) = world.pair_mut(self.body1, self.body2) else {
            return;
        };
        let offset = b1.centroid() - b2.centroid();
        let distance = offset.length();
        if distance <= self.min_distance {
            return;
        }
        let magnitude = self.g * b1.mass() * b2.mass() / (distance * distance);
        if !magnitude.is_finite() {
            log::trace!("Skipping gravity with unbounded magnitude");
            return;
        }
        let force = offset / distance * magnitude;
        b1.add_force(-force);
        b2.add_force(force);
    }
}

/// Hooke's-law spring with zero rest length
#[derive(Debug, Clone)]
pub struct Spring {
    pub k: f64,
    pub body1: BodyId,
    pub body2: BodyId,
}

impl ForceCreator for Spring {
    fn apply(&mut self, world: &mut World) {
        let Some((b1, b2)) = world.pair_mut(self.body1, self.body2) else {
            return;
        };
        let force = (b1.centroid() - b2.centroid()) * self.k;
        b1.add_force(-force);
        b2.add_force(force);
    }
}

/// Linear drag opposing velocity
#[derive(Debug, Clone)]
pub struct Drag {
    pub gamma: f64,
    pub body: BodyId,
}

impl ForceCreator for Drag {
    fn apply(&mut self, world: &mut World) {
        if let Some(body) = world.body_mut(self.body) {
            let force = body.velocity() * -self.gamma;
            body.add_force(force);
        }
    }
}

/// Constant downward pull on the player, suspended while it rests on something
#[derive(Debug, Clone)]
pub struct PlayerGravity {
    pub g: f64,
    pub player: BodyId,
}

impl ForceCreator for PlayerGravity {
    fn apply(&mut self, world: &mut World) {
        if let Some(player) = world.body_mut(self.player) {
            if !player.info().colliding {
                player.add_force(Vector2::new(0.0, -self.g));
            }
        }
    }
}

/// Debounce state for a collision rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactState {
    #[default]
    Idle,
    Contact,
}

/// Runs a handler once each time two bodies come into contact
///
/// The handler fires on the tick the shapes start overlapping and not again
/// until they have separated for at least one tick.
pub struct CollisionCreator<H> {
    pub body1: BodyId,
    pub body2: BodyId,
    pub handler: H,
    state: ContactState,
}

impl<H: CollisionHandler> CollisionCreator<H> {
    pub fn new(body1: BodyId, body2: BodyId, handler: H) -> Self {
        Self {
            body1,
            body2,
            handler,
            state: ContactState::Idle,
        }
    }

    pub fn state(&self) -> ContactState {
        self.state
    }
}

impl<H: CollisionHandler> ForceCreator for CollisionCreator<H> {
    fn apply(&mut self, world: &mut World) {
        let (Some(b1), Some(b2)) = (world.body(self.body1), world.body(self.body2)) else {
            return;
        };
        let info = find_collision(b1.shape(), b2.shape());
        if !info.collided {
            self.state = ContactState::Idle;
            return;
        }
        if self.state == ContactState::Contact {
            return;
        }
        self.state = ContactState::Contact;
        self.handler
            .on_collision(world, self.body1, self.body2, info.axis);
    }
}

/// Gap at which a resting player still counts as touching its platform
const CONTACT_SLOP: f64 = 1e-9;

/// Lands a falling player on a platform and holds it there
///
/// While attached, the player rides the platform's vertical velocity with its
/// bottom edge on the platform's top, and the rule holds `colliding` on both
/// bodies. The player detaches when the shapes separate, the gap grows past
/// `threshold`, or the player rises relative to the platform. If either body
/// is removed mid-contact, the survivor is released when the rule retires.
#[derive(Debug, Clone)]
pub struct PlatformAttach {
    pub threshold: f64,
    pub player: BodyId,
    pub platform: BodyId,
    state: ContactState,
}

impl PlatformAttach {
    pub fn new(player: BodyId, platform: BodyId, threshold: f64) -> Self {
        Self {
            threshold,
            player,
            platform,
            state: ContactState::Idle,
        }
    }

    pub fn state(&self) -> ContactState {
        self.state
    }

    /// Pin the player onto the platform's top edge
    fn hold(player: &mut Body, platform: &Body, gap: f64) {
        let v = player.velocity();
        player.set_velocity(Vector2::new(v.x, platform.velocity().y));
        let f = player.force();
        player.set_force(Vector2::new(f.x, 0.0));
        player.translate(Vector2::new(0.0, -gap));
    }

    fn grab(player: &mut Body, platform: &mut Body) {
        player.info_mut().grab();
        platform.info_mut().grab();
    }

    fn release(player: &mut Body, platform: &mut Body) {
        player.info_mut().release();
        platform.info_mut().release();
    }
}

impl ForceCreator for PlatformAttach {
    fn apply(&mut self, world: &mut World) {
        let Some((player, platform)) = world.pair_mut(self.player, self.platform) else {
            return;
        };
        let collided = find_collision(player.shape(), platform.shape()).collided;
        let pb = player.shape().bounding_box();
        let fb = platform.shape().bounding_box();
        let gap = pb.min.y - fb.max.y;
        let within = gap.abs() <= self.threshold;

        match self.state {
            ContactState::Idle => {
                if collided && within && player.velocity().y < 0.0 {
                    Self::hold(player, platform, gap);
                    Self::grab(player, platform);
                    self.state = ContactState::Contact;
                    log::trace!("Player landed on platform");
                }
            }
            ContactState::Contact => {
                let rising = player.velocity().y > platform.velocity().y;
                let overhead = Interval { min: pb.min.x, max: pb.max.x }
                    .overlap(&Interval { min: fb.min.x, max: fb.max.x })
                    .is_some();
                let supported = collided || (gap.abs() <= CONTACT_SLOP && overhead);
                if supported && within && !rising {
                    Self::hold(player, platform, gap);
                } else {
                    Self::release(player, platform);
                    self.state = ContactState::Idle;
                    log::trace!("Player left platform");
                }
            }
        }
    }

    fn retire(&mut self, world: &mut World) {
        if self.state != ContactState::Contact {
            return;
        }
        for id in [self.player, self.platform] {
            if let Some(body) = world.body_mut(id) {
                body.info_mut().release();
            }
        }
        self.state = ContactState::Idle;
        log::trace!("Platform rule retired mid-contact, releasing player");
    }
}

pub fn create_newtonian_gravity(
    scene: &mut Scene,
    g: f64,
    body1: BodyId,
    body2: BodyId,
) -> Result<(), PhysicsError> {
    let min_distance = scene.settings().min_gravity_distance;
    scene.add_force_creator(
        Gravity {
            g,
            min_distance,
            body1,
            body2,
        },
        [body1, body2],
    )
}

pub fn create_spring(
    scene: &mut Scene,
    k: f64,
    body1: BodyId,
    body2: BodyId,
) -> Result<(), PhysicsError> {
    scene.add_force_creator(Spring { k, body1, body2 }, [body1, body2])
}

pub fn create_drag(scene: &mut Scene, gamma: f64, body: BodyId) -> Result<(), PhysicsError> {
    scene.add_force_creator(Drag { gamma, body }, [body])
}

/// Downward pull of `Settings::player_gravity` on `player`
pub fn create_player_gravity(scene: &mut Scene, player: BodyId) -> Result<(), PhysicsError> {
    let g = scene.settings().player_gravity;
    scene.add_force_creator(PlayerGravity { g, player }, [player])
}

/// Run `handler` once per contact event between two bodies
pub fn create_collision<H>(
    scene: &mut Scene,
    body1: BodyId,
    body2: BodyId,
    handler: H,
) -> Result<(), PhysicsError>
where
    H: CollisionHandler + 'static,
{
    scene.add_force_creator(CollisionCreator::new(body1, body2, handler), [body1, body2])
}

fn create_restitution(
    scene: &mut Scene,
    elasticity: f64,
    impact: Impact,
    body1: BodyId,
    body2: BodyId,
) -> Result<(), PhysicsError> {
    create_collision(scene, body1, body2, Restitution { elasticity, impact })
}

/// Elastic bounce applied to both bodies
pub fn create_physics_collision(
    scene: &mut Scene,
    elasticity: f64,
    body1: BodyId,
    body2: BodyId,
) -> Result<(), PhysicsError> {
    create_restitution(scene, elasticity, Impact::Reciprocal, body1, body2)
}

/// `body1` bounces off `body2`, which is removed
pub fn create_partial_collision(
    scene: &mut Scene,
    elasticity: f64,
    body1: BodyId,
    body2: BodyId,
) -> Result<(), PhysicsError> {
    create_restitution(scene, elasticity, Impact::RemoveTarget, body1, body2)
}

/// `body1` bounces off `body2`, which loses a life and is removed when it has none left
pub fn create_partial_collision_with_life(
    scene: &mut Scene,
    elasticity: f64,
    body1: BodyId,
    body2: BodyId,
) -> Result<(), PhysicsError> {
    create_restitution(scene, elasticity, Impact::SpendTargetLife, body1, body2)
}

/// `body1` bounces off `body2`, which is left untouched
pub fn create_one_sided_collision(
    scene: &mut Scene,
    elasticity: f64,
    body1: BodyId,
    body2: BodyId,
) -> Result<(), PhysicsError> {
    create_restitution(scene, elasticity, Impact::OneSided, body1, body2)
}

/// Remove both bodies on contact
pub fn create_destructive_collision(
    scene: &mut Scene,
    body1: BodyId,
    body2: BodyId,
) -> Result<(), PhysicsError> {
    create_collision(scene, body1, body2, Destroy::new(DestroyMode::Both))
}

/// Remove `body2` on contact
pub fn create_partial_destructive_collision(
    scene: &mut Scene,
    body1: BodyId,
    body2: BodyId,
) -> Result<(), PhysicsError> {
    create_collision(scene, body1, body2, Destroy::new(DestroyMode::Target))
}

/// Take a life from `body2` on contact, removing it when it has none left
pub fn create_partial_destructive_collision_with_life(
    scene: &mut Scene,
    body1: BodyId,
    body2: BodyId,
) -> Result<(), PhysicsError> {
    create_collision(scene, body1, body2, Destroy::new(DestroyMode::TargetLife))
}

/// Collect `point` for one score when the player touches it
pub fn create_player_point_collision(
    scene: &mut Scene,
    player: BodyId,
    point: BodyId,
) -> Result<(), PhysicsError> {
    create_collision(scene, player, point, CollectPoint)
}

/// Activate `power_up` for `Settings::powerup_ticks` when the player touches it
pub fn create_player_powerup_collision(
    scene: &mut Scene,
    player: BodyId,
    power_up: BodyId,
) -> Result<(), PhysicsError> {
    let duration = scene.settings().powerup_ticks;
    create_collision(scene, player, power_up, ActivatePowerUp { duration })
}

/// Let the player land on `platform`, within `Settings::attach_distance`
pub fn create_player_platform_collision(
    scene: &mut Scene,
    player: BodyId,
    platform: BodyId,
) -> Result<(), PhysicsError> {
    let threshold = scene.settings().attach_distance;
    scene.add_force_creator(
        PlatformAttach::new(player, platform, threshold),
        [player, platform],
    )
}
