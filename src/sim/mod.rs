//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod boost;
pub mod collision;
pub mod enemy;
pub mod generator;
pub mod geom;
pub mod platform;
pub mod player;
pub mod state;
pub mod tick;

pub use boost::{Boost, BoostEffect, BoostKind, BuffKind};
pub use collision::{
    EnemyContact, EnemyOutcome, PlatformBounce, bullet_enemy_collision, handle_boost_pickup,
    handle_enemy_collision, handle_platform_collision, player_boost_collision,
    player_enemy_collision, player_platform_collision,
};
pub use enemy::{Bullet, Enemy, EnemyKind};
pub use generator::{
    GeneratorState, calculate_platform_gap, extend_platforms, generate_initial_platforms,
};
pub use geom::Aabb;
pub use platform::{Platform, PlatformKind};
pub use player::Player;
pub use state::{GameOverReason, GamePhase, GameState};
pub use tick::{TickInput, autopilot, tick};
