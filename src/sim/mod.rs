//! Physics core
//!
//! All simulation logic lives here. This module must stay deterministic:
//! - Caller-chosen timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order for bodies, registration order for creators)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod color;
pub mod error;
pub mod forces;
pub mod handlers;
pub mod polygon;
pub mod scene;
pub mod shape;
pub mod status;
pub mod vector;

pub use body::{Body, BodyInfo, BodyKind, PowerUpKind};
pub use collision::{CollisionInfo, find_collision};
pub use color::Color;
pub use error::PhysicsError;
pub use forces::{
    CollisionCreator, ContactState, Drag, Gravity, PlatformAttach, PlayerGravity, Spring,
    create_collision, create_destructive_collision, create_drag, create_newtonian_gravity,
    create_one_sided_collision, create_partial_collision, create_partial_collision_with_life,
    create_partial_destructive_collision, create_partial_destructive_collision_with_life,
    create_physics_collision, create_player_gravity, create_player_platform_collision,
    create_player_point_collision, create_player_powerup_collision, create_spring,
};
pub use handlers::{
    ActivatePowerUp, CollectPoint, CollisionHandler, Destroy, DestroyMode, Impact, Restitution,
};
pub use polygon::{Aabb, Polygon};
pub use scene::{BodyId, ForceCreator, Scene, World};
pub use status::Status;
pub use vector::Vector2;
