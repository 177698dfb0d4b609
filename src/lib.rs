//! Skyhop - simulation core for a vertically scrolling jump-and-climb game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, generation, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `frame`: Fixed-step accumulator for hosts driving the simulation
//! - `view`: Read-only scene and HUD data for renderers

pub mod frame;
pub mod sim;
pub mod tuning;
pub mod view;

pub use frame::FixedStepper;
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
///
/// World coordinates are Y-up: larger `y` is higher. Renderers flip to screen space.
pub mod consts {
    /// Target simulation rate
    pub const SIM_HZ: f32 = 60.0;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f32 = 1000.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical world bounds
    pub const GAME_WIDTH: f32 = 380.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Downward acceleration applied once per tick
    pub const GRAVITY: f32 = 0.4;
    /// Base upward impulse of a platform bounce
    pub const JUMP_FORCE: f32 = 12.0;
    /// Horizontal speed while a direction is held
    pub const MOVE_SPEED: f32 = 5.0;
    /// Apex of a base jump: JUMP_FORCE² / (2·GRAVITY)
    pub const MAX_JUMP_HEIGHT: f32 = JUMP_FORCE * JUMP_FORCE / (2.0 * GRAVITY);

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPAWN_X: f32 = GAME_WIDTH / 2.0;
    pub const PLAYER_SPAWN_Y: f32 = 100.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 60.0;
    pub const PLATFORM_HEIGHT: f32 = 15.0;
    pub const MOVING_PLATFORM_SPEED: f32 = 2.0;
    /// Guaranteed platform under the spawn column
    pub const START_PLATFORM_X: f32 = GAME_WIDTH / 2.0 - PLATFORM_WIDTH / 2.0;
    pub const START_PLATFORM_Y: f32 = 50.0;
    /// Break animation progress per tick once triggered
    pub const BREAK_ANIMATION_STEP: f32 = 0.05;
    /// Progress at which a breaking platform is removed
    pub const BREAK_THRESHOLD: f32 = 1.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 30.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    pub const ENEMY_SPEED: f32 = 2.0;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const BULLET_SPEED: f32 = 15.0;

    /// Boost defaults
    pub const BOOST_WIDTH: f32 = 20.0;
    pub const BOOST_HEIGHT: f32 = 20.0;

    /// Vertical slack when judging a landing on a platform or an enemy's top
    pub const CONTACT_TOLERANCE: f32 = 10.0;
    /// Vertical slack when judging a boost pickup
    pub const BOOST_TOLERANCE: f32 = 15.0;

    /// Jump multipliers by platform type
    pub const BREAKING_BOUNCE: f32 = 0.7;
    pub const MOVING_BOUNCE: f32 = 1.2;
    /// Bounce after a non-lethal enemy hit (relative to JUMP_FORCE)
    pub const HURT_BOUNCE: f32 = 0.5;
}

/// Wrap a horizontal position around the cylindrical world.
///
/// Crossing the left edge lands on the right edge and vice versa.
#[inline]
pub fn wrap_horizontal(x: f32) -> f32 {
    if x < 0.0 {
        consts::GAME_WIDTH
    } else if x > consts::GAME_WIDTH {
        0.0
    } else {
        x
    }
}

/// Linear interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp_clamped(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    from * (1.0 - t) + to * t
}
