//! Collectible power-ups
//!
//! Each kind has exactly one effect, looked up through [`BoostKind::effect`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use crate::consts::*;

/// Boost types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoostKind {
    Double,
    Quadruple,
    RapidFire,
    AutoFire,
    Shield,
}

/// Timed player buffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    RapidFire,
    AutoFire,
}

/// What collecting a boost does to the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoostEffect {
    /// Multiply the bounce impulse
    Impulse(f32),
    /// Start a timed buff
    Buff(BuffKind),
    /// Arm the one-hit shield
    Shield,
}

impl BoostKind {
    pub const ALL: [BoostKind; 5] = [
        BoostKind::Double,
        BoostKind::Quadruple,
        BoostKind::RapidFire,
        BoostKind::AutoFire,
        BoostKind::Shield,
    ];

    pub fn effect(self) -> BoostEffect {
        match self {
            BoostKind::Double => BoostEffect::Impulse(2.0),
            BoostKind::Quadruple => BoostEffect::Impulse(4.0),
            BoostKind::RapidFire => BoostEffect::Buff(BuffKind::RapidFire),
            BoostKind::AutoFire => BoostEffect::Buff(BuffKind::AutoFire),
            BoostKind::Shield => BoostEffect::Shield,
        }
    }

    /// Impulse boosts only pay out through a bounce
    pub fn is_impulse(self) -> bool {
        matches!(self.effect(), BoostEffect::Impulse(_))
    }
}

/// A boost entity, carried by a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boost {
    pub kind: BoostKind,
    /// Bottom-left corner
    pub pos: Vec2,
    pub collected: bool,
    /// Hover animation counter
    #[serde(default)]
    pub anim_phase: u32,
}

impl Boost {
    pub fn new(kind: BoostKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            collected: false,
            anim_phase: 0,
        }
    }

    /// A boost resting centred on top of a platform at `platform_pos`
    pub fn on_platform(kind: BoostKind, platform_pos: Vec2) -> Self {
        let pos = Vec2::new(
            platform_pos.x + (PLATFORM_WIDTH - BOOST_WIDTH) / 2.0,
            platform_pos.y + PLATFORM_HEIGHT,
        );
        Self::new(kind, pos)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(BOOST_WIDTH, BOOST_HEIGHT))
    }

    /// Collect the boost. Yields its effect the first time only.
    pub fn collect(&mut self) -> Option<BoostEffect> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.kind.effect())
    }

    pub fn advance(&mut self) {
        self.anim_phase = self.anim_phase.wrapping_add(1);
    }
}
