//! Poly Arcade - polygon physics for small 2D arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, scene, SAT collisions, force creators)
//! - `renderer`: Draw contract and world-to-screen mapping
//! - `platform`: Keyboard events and frame timing
//! - `settings`: Data-driven physics tunables

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{Body, BodyId, Color, PhysicsError, Polygon, Scene, Vector2};

/// Physics configuration constants
pub mod consts {
    /// Seed for the scene RNG when none is configured
    pub const DEFAULT_SEED: u64 = 0x5eed;

    /// Bodies closer than this feel no mutual gravity
    pub const MIN_GRAVITY_DISTANCE: f64 = 5.0;
    /// Constant downward force on the player
    pub const PLAYER_GRAVITY: f64 = 9.8e3;
    /// Per-axis cap on player speed
    pub const MAX_PLAYER_SPEED: f64 = 100.0;

    /// Largest gap at which a falling player snaps onto a platform
    pub const ATTACH_DISTANCE: f64 = 10.0;
    /// Power-up effect length (scene ticks)
    pub const POWERUP_TICKS: u32 = 600;

    /// Longest frame step handed to the scene, in seconds
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Vertex count for circular bodies
    pub const CIRCLE_SEGMENTS: usize = 126;
}
