//! Enemies and the bullets that defeat them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use crate::consts::*;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Static,
    Moving,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    /// Bottom-left corner
    pub pos: Vec2,
    /// Horizontal speed per tick, sign is direction (moving enemies only)
    pub speed: f32,
    /// Animation counter, drives the hover bob in the view
    pub anim_phase: u32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, kind: EnemyKind) -> Self {
        let speed = match kind {
            EnemyKind::Moving => ENEMY_SPEED,
            EnemyKind::Static => 0.0,
        };
        Self {
            id,
            kind,
            pos,
            speed,
            anim_phase: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + ENEMY_HEIGHT
    }

    /// Animate; moving enemies also patrol between the screen edges
    pub fn advance(&mut self) {
        self.anim_phase = self.anim_phase.wrapping_add(1);

        if self.kind == EnemyKind::Moving {
            self.pos.x += self.speed;
            if self.pos.x + ENEMY_WIDTH > GAME_WIDTH {
                self.speed = -self.speed.abs();
            } else if self.pos.x < 0.0 {
                self.speed = self.speed.abs();
            }
        }
    }
}

/// A bullet travelling straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Centre of the bullet
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(0.0, BULLET_SPEED),
            radius: BULLET_RADIUS,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }

    /// Constant velocity, no gravity
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}
