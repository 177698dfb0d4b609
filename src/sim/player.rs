//! The player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boost::BuffKind;
use super::geom::Aabb;
use crate::consts::*;
use crate::wrap_horizontal;

/// The player. `pos` is the bottom-left corner, so `pos.y` is the feet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Set by a jump, cleared by a landing. Blocks a second impulse mid-air.
    pub jumping: bool,
    pub lives: u8,
    /// One-hit shield against a non-stomp enemy contact
    pub shield: bool,
    pub rapid_fire: bool,
    pub rapid_fire_until_ms: f64,
    pub auto_fire: bool,
    pub auto_fire_until_ms: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            jumping: false,
            lives: STARTING_LIVES,
            shield: false,
            rapid_fire: false,
            rapid_fire_until_ms: 0.0,
            auto_fire: false,
            auto_fire_until_ms: 0.0,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Point bullets leave from
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    /// One fixed tick of movement.
    ///
    /// Input maps straight to horizontal velocity; gravity is applied once per
    /// call, so callers must call this exactly once per tick.
    pub fn advance(&mut self, left: bool, right: bool) {
        self.vel.x = if left {
            -MOVE_SPEED
        } else if right {
            MOVE_SPEED
        } else {
            0.0
        };

        self.vel.y -= GRAVITY;
        self.pos += self.vel;
        self.pos.x = wrap_horizontal(self.pos.x);
    }

    /// Apply an upward impulse unless one is already in flight.
    /// Returns whether the impulse took effect.
    pub fn jump(&mut self, force: f32) -> bool {
        if self.jumping {
            return false;
        }
        self.vel.y = force;
        self.jumping = true;
        true
    }

    /// Clear the jump guard after a legitimate landing
    pub fn land(&mut self) {
        self.jumping = false;
    }

    /// Lose a life. Returns true when none are left.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn activate_rapid_fire(&mut self, now_ms: f64, duration_ms: f64) {
        self.rapid_fire = true;
        self.rapid_fire_until_ms = now_ms + duration_ms;
    }

    pub fn activate_auto_fire(&mut self, now_ms: f64, duration_ms: f64) {
        self.auto_fire = true;
        self.auto_fire_until_ms = now_ms + duration_ms;
    }

    pub fn activate_buff(&mut self, buff: BuffKind, now_ms: f64, duration_ms: f64) {
        match buff {
            BuffKind::RapidFire => self.activate_rapid_fire(now_ms, duration_ms),
            BuffKind::AutoFire => self.activate_auto_fire(now_ms, duration_ms),
        }
    }

    pub fn activate_shield(&mut self) {
        self.shield = true;
    }

    /// Use up the shield. Returns whether one was active.
    pub fn consume_shield(&mut self) -> bool {
        std::mem::replace(&mut self.shield, false)
    }

    /// Expire timed buffs whose deadline has passed
    pub fn update_boosts(&mut self, now_ms: f64) {
        if self.rapid_fire && now_ms >= self.rapid_fire_until_ms {
            self.rapid_fire = false;
            log::debug!("Rapid fire expired");
        }
        if self.auto_fire && now_ms >= self.auto_fire_until_ms {
            self.auto_fire = false;
            log::debug!("Auto fire expired");
        }
    }

    /// Milliseconds left on a buff (0 when inactive)
    pub fn buff_remaining_ms(&self, buff: BuffKind, now_ms: f64) -> f64 {
        let (active, until) = match buff {
            BuffKind::RapidFire => (self.rapid_fire, self.rapid_fire_until_ms),
            BuffKind::AutoFire => (self.auto_fire, self.auto_fire_until_ms),
        };
        if active { (until - now_ms).max(0.0) } else { 0.0 }
    }

    /// Back to spawn with session-start lives and no buffs
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
