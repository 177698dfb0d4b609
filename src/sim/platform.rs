//! Platforms the player bounces on

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boost::Boost;
use super::geom::Aabb;
use crate::consts::*;

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    Moving,
    Breaking,
}

impl PlatformKind {
    /// Jump impulse multiplier for a bounce on this type
    pub fn bounce_multiplier(self) -> f32 {
        match self {
            PlatformKind::Normal => 1.0,
            PlatformKind::Moving => MOVING_BOUNCE,
            PlatformKind::Breaking => BREAKING_BOUNCE,
        }
    }
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub kind: PlatformKind,
    /// Bottom-left corner
    pub pos: Vec2,
    /// Horizontal speed per tick (moving platforms only)
    pub speed: Option<f32>,
    pub boost: Option<Boost>,
    /// Set once a breaking platform has been stepped on
    pub breaking: bool,
    /// Break animation progress, 0 until triggered
    pub break_progress: f32,
    /// Whether the player has already scored a bounce here
    #[serde(default)]
    pub bounced: bool,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, kind: PlatformKind) -> Self {
        let speed = match kind {
            PlatformKind::Moving => Some(MOVING_PLATFORM_SPEED),
            _ => None,
        };
        Self {
            id,
            kind,
            pos,
            speed,
            boost: None,
            breaking: false,
            break_progress: 0.0,
            bounced: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT))
    }

    /// Height of the surface the player lands on
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + PLATFORM_HEIGHT
    }

    /// Whether the player can still land here
    pub fn is_solid(&self) -> bool {
        !self.breaking
    }

    /// A breaking platform whose animation has run out
    pub fn is_broken(&self) -> bool {
        self.breaking && self.break_progress >= BREAK_THRESHOLD
    }

    /// Start the break animation. No-op for other types or if already breaking.
    pub fn trigger_break(&mut self) -> bool {
        if self.kind != PlatformKind::Breaking || self.breaking {
            return false;
        }
        self.breaking = true;
        true
    }

    /// Move (moving platforms), run the break animation, animate the boost
    pub fn advance(&mut self) {
        if let Some(speed) = self.speed {
            let old_x = self.pos.x;
            self.pos.x += speed;

            if self.pos.x + PLATFORM_WIDTH > GAME_WIDTH {
                self.speed = Some(-speed.abs());
            } else if self.pos.x < 0.0 {
                self.speed = Some(speed.abs());
            }

            if let Some(boost) = &mut self.boost {
                boost.pos.x += self.pos.x - old_x;
            }
        }

        if self.breaking {
            self.break_progress = (self.break_progress + BREAK_ANIMATION_STEP).min(BREAK_THRESHOLD);
        }

        if let Some(boost) = &mut self.boost {
            boost.advance();
        }
    }
}
