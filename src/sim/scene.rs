//! Scene: the body registry and the per-tick force pipeline
//!
//! Bodies live in a generational arena and are addressed by [`BodyId`]. A
//! handle to a body that has been reaped simply stops resolving, so force
//! creators can hold ids across ticks without dangling.
//!
//! One [`Scene::tick`] runs, in order:
//! 1. every force creator, in registration order
//! 2. retirement of creators whose participants were removed; each one's
//!    [`ForceCreator::retire`] runs before it is dropped
//! 3. integration of every body, in insertion order
//! 4. reaping of removed bodies
//! 5. the status timers

use std::ops::{Deref, DerefMut};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use thunderdome as td;

use super::body::Body;
use super::color::Color;
use super::error::PhysicsError;
use super::polygon::Polygon;
use super::status::Status;
use crate::settings::Settings;

/// Key type to look up a body stored in a scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(td::Index);

/// A computation run once per tick that reads and writes bodies
///
/// Continuous force laws accumulate forces here; collision rules detect
/// contact and apply impulses or flag bodies for removal. Any state the
/// creator needs lives in the implementing type and is dropped when the
/// creator is retired.
pub trait ForceCreator {
    fn apply(&mut self, world: &mut World);

    /// Called once when a participant has been removed, just before the
    /// creator is dropped. Bodies that are still live can be reached through
    /// `world`; this is where a rule undoes flags it set on them.
    fn retire(&mut self, _world: &mut World) {}
}

impl<F> ForceCreator for F
where
    F: FnMut(&mut World),
{
    fn apply(&mut self, world: &mut World) {
        self(world)
    }
}

/// Everything a force creator may touch during a tick
pub struct World {
    bodies: td::Arena<Body>,
    /// Live ids in insertion order; index 0 is conventionally the player
    order: Vec<BodyId>,
    status: Status,
    score: u64,
    rng: Pcg32,
    settings: Settings,
}

impl World {
    fn new(settings: Settings) -> Self {
        Self {
            bodies: td::Arena::new(),
            order: Vec::new(),
            status: Status::new(),
            score: 0,
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
        }
    }

    /// Append a body; it is integrated from the next tick on
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.insert(body));
        self.order.push(id);
        id
    }

    #[inline]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    #[inline]
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    /// Mutable access to two distinct bodies at once
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut Body, &mut Body)> {
        if a == b {
            return None;
        }
        match self.bodies.get2_mut(a.0, b.0) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Whether `id` resolves to a body that has not been flagged for removal
    pub fn is_live(&self, id: BodyId) -> bool {
        self.body(id).is_some_and(|b| !b.is_removed())
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.order.len()
    }

    /// Id of the body at insertion position `index`
    pub fn id_at(&self, index: usize) -> Option<BodyId> {
        self.order.get(index).copied()
    }

    pub fn body_at(&self, index: usize) -> Option<&Body> {
        self.id_at(index).and_then(|id| self.body(id))
    }

    pub fn body_at_mut(&mut self, index: usize) -> Option<&mut Body> {
        let id = self.id_at(index)?;
        self.body_mut(id)
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.order.iter().copied()
    }

    /// Bodies in insertion order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.bodies.get(id.0).map(|b| (*id, b)))
    }

    /// Flag a body for removal; it is freed at the end of the next tick
    pub fn remove_body(&mut self, id: BodyId) -> Result<(), PhysicsError> {
        let body = self.body_mut(id).ok_or(PhysicsError::UnknownBody(id))?;
        body.remove();
        Ok(())
    }

    #[inline]
    pub fn status(&self) -> &Status {
        &self.status
    }

    #[inline]
    pub fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// Scene-owned RNG, seeded from the settings
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn random_color(&mut self) -> Color {
        Color::random(&mut self.rng)
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Polygons and colors of every live body, in insertion order
    pub fn drawables(&self) -> impl Iterator<Item = (&Polygon, Color)> + '_ {
        self.bodies()
            .filter(|(_, b)| !b.is_removed())
            .map(|(_, b)| (b.shape(), b.color()))
    }

    fn integrate(&mut self, dt: f64) {
        for id in &self.order {
            if let Some(body) = self.bodies.get_mut(id.0) {
                body.tick(dt);
            }
        }
    }

    /// Free every flagged body, keeping survivors in order. Returns how many were freed.
    fn reap(&mut self) -> usize {
        let bodies = &mut self.bodies;
        let before = self.order.len();
        self.order.retain(|id| {
            let removed = bodies.get(id.0).is_none_or(Body::is_removed);
            if removed {
                bodies.remove(id.0);
            }
            !removed
        });
        before - self.order.len()
    }
}

/// A registered force creator and the bodies it depends on
struct SceneForcer {
    creator: Box<dyn ForceCreator>,
    bodies: Vec<BodyId>,
}

/// Owns the world and the ordered list of force creators
pub struct Scene {
    world: World,
    forcers: Vec<SceneForcer>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            world: World::new(settings),
            forcers: Vec::new(),
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Register a force creator that runs every tick
    ///
    /// The creator is retired as soon as any of `bodies` is removed. With no
    /// participants it stays for the life of the scene.
    pub fn add_force_creator<C>(
        &mut self,
        creator: C,
        bodies: impl IntoIterator<Item = BodyId>,
    ) -> Result<(), PhysicsError>
    where
        C: ForceCreator + 'static,
    {
        let bodies: Vec<BodyId> = bodies.into_iter().collect();
        if let Some(missing) = bodies.iter().find(|id| self.world.body(**id).is_none()) {
            return Err(PhysicsError::UnknownBody(*missing));
        }
        self.forcers.push(SceneForcer {
            creator: Box::new(creator),
            bodies,
        });
        Ok(())
    }

    #[inline]
    pub fn force_creator_count(&self) -> usize {
        self.forcers.len()
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        for forcer in &mut self.forcers {
            forcer.creator.apply(&mut self.world);
        }

        // Creators go before bodies so none is left holding a freed id
        let world = &mut self.world;
        let before = self.forcers.len();
        self.forcers.retain_mut(|f| {
            if f.bodies.iter().all(|id| world.is_live(*id)) {
                return true;
            }
            f.creator.retire(world);
            false
        });
        let retired = before - self.forcers.len();

        self.world.integrate(dt);
        let reaped = self.world.reap();
        self.world.status.tick();

        if retired > 0 || reaped > 0 {
            log::debug!(
                "Retired {} force creators, reaped {} bodies ({} bodies, {} creators left)",
                retired,
                reaped,
                self.world.body_count(),
                self.forcers.len()
            );
        }
    }
}

impl Deref for Scene {
    type Target = World;

    fn deref(&self) -> &World {
        &self.world
    }
}

impl DerefMut for Scene {
    fn deref_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
