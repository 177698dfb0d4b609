//! Axis-aligned box geometry
//!
//! Every entity is a box anchored at its bottom-left corner in Y-up world space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box, `pos` is the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Box of side `2 * radius` centred on `center`
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self {
            pos: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict horizontal overlap (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Strict vertical overlap
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.top() > other.bottom() && self.bottom() < other.top()
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// Whether a falling body's feet are resting on `surface_y` this tick.
///
/// The band reaches `tolerance` above the surface and at least `tolerance`
/// below it, further if the body fell more than that during the tick.
#[inline]
pub fn feet_on_surface(feet_y: f32, fall_speed: f32, surface_y: f32, tolerance: f32) -> bool {
    let below = tolerance.max(fall_speed.abs());
    feet_y < surface_y + tolerance && feet_y >= surface_y - below
}
