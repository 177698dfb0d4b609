//! Data-driven game balance
//!
//! Values that changed between balance passes live here instead of in `consts`.
//! Loaded from JSON by hosts that want to experiment; `Tuning::default()` is the
//! shipped balance.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_JUMP_HEIGHT, PLATFORM_HEIGHT};
use crate::sim::boost::BoostKind;
use crate::sim::platform::PlatformKind;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} out of range ({value})")]
    OutOfRange { field: &'static str, value: f32 },
    #[error("{table} chances sum above 1.0")]
    ChanceTableOverflow { table: &'static str },
}

/// Probability of each platform type at a given difficulty point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeChances {
    pub normal: f32,
    pub moving: f32,
    pub breaking: f32,
}

impl TypeChances {
    /// Interpolate between two difficulty points
    pub fn lerp(&self, other: &TypeChances, t: f32) -> TypeChances {
        TypeChances {
            normal: crate::lerp_clamped(self.normal, other.normal, t),
            moving: crate::lerp_clamped(self.moving, other.moving, t),
            breaking: crate::lerp_clamped(self.breaking, other.breaking, t),
        }
    }

    /// Pick a platform type from a uniform roll in [0, 1)
    pub fn pick(&self, roll: f32) -> PlatformKind {
        let total = self.normal + self.moving + self.breaking;
        if total <= 0.0 {
            return PlatformKind::Normal;
        }
        let roll = roll * total;
        if roll < self.normal {
            PlatformKind::Normal
        } else if roll < self.normal + self.moving {
            PlatformKind::Moving
        } else {
            PlatformKind::Breaking
        }
    }

    fn validate(&self, table: &'static str) -> Result<(), ConfigError> {
        check_unit(table, self.normal)?;
        check_unit(table, self.moving)?;
        check_unit(table, self.breaking)?;
        if self.normal + self.moving + self.breaking <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: table,
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Chance of a platform carrying each boost kind
///
/// Rolled as cumulative thresholds in declaration order, so the kinds are
/// mutually exclusive and the remainder means "no boost".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostTable {
    pub quadruple: f32,
    pub double: f32,
    pub rapid_fire: f32,
    #[serde(default)]
    pub auto_fire: f32,
    #[serde(default)]
    pub shield: f32,
}

impl BoostTable {
    pub fn total(&self) -> f32 {
        self.quadruple + self.double + self.rapid_fire + self.auto_fire + self.shield
    }

    /// Pick a boost from a uniform roll in [0, 1)
    pub fn pick(&self, roll: f32) -> Option<BoostKind> {
        let table = [
            (self.quadruple, BoostKind::Quadruple),
            (self.double, BoostKind::Double),
            (self.rapid_fire, BoostKind::RapidFire),
            (self.auto_fire, BoostKind::AutoFire),
            (self.shield, BoostKind::Shield),
        ];
        let mut threshold = 0.0;
        for (chance, kind) in table {
            threshold += chance;
            if roll < threshold {
                return Some(kind);
            }
        }
        None
    }

    fn validate(&self, table: &'static str) -> Result<(), ConfigError> {
        for chance in [
            self.quadruple,
            self.double,
            self.rapid_fire,
            self.auto_fire,
            self.shield,
        ] {
            check_unit(table, chance)?;
        }
        if self.total() > 1.0 {
            return Err(ConfigError::ChanceTableOverflow { table });
        }
        Ok(())
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Enemies ===
    /// Chance that a fresh checkpoint spawns an enemy
    pub enemy_spawn_chance: f32,
    /// Max height below which no enemy is ever rolled
    pub enemy_spawn_floor: f32,
    /// Height band that rate-limits enemy rolls
    pub enemy_checkpoint: f32,

    // === Scoring ===
    /// Points for the first bounce on each platform (0 disables)
    pub platform_bounce_bonus: u64,

    // === Initial layout ===
    /// Platforms in the opening layout, including the start platform
    pub initial_platform_count: usize,
    /// Chance of a moving platform in the opening layout
    pub initial_moving_chance: f32,
    /// Platforms below this height never carry boosts
    pub boost_floor_height: f32,
    pub initial_boosts: BoostTable,

    // === Incremental generation ===
    pub generated_boosts: BoostTable,
    pub type_chances_start: TypeChances,
    pub type_chances_horizon: TypeChances,
    /// Height over which difficulty ramps from start to horizon values
    pub difficulty_horizon: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    /// Fraction of MAX_JUMP_HEIGHT a gap may use at height 0
    pub gap_safety_start: f32,
    /// Fraction of MAX_JUMP_HEIGHT a gap may use at the horizon
    pub gap_safety_horizon: f32,
    /// Floor on any gap, keeps platforms from overlapping
    pub min_platform_spacing: f32,
    /// Gap after a boosted platform, as a fraction of MAX_JUMP_HEIGHT
    pub boosted_gap_fraction: f32,
    /// Keep the platform frontier this far above the top of the view
    pub generation_lookahead: f32,

    // === Buffs and shooting ===
    pub rapid_fire_ms: f64,
    pub auto_fire_ms: f64,
    pub shot_cooldown_ms: f64,
    pub rapid_shot_cooldown_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_spawn_chance: 0.3,
            enemy_spawn_floor: 3000.0,
            enemy_checkpoint: 500.0,

            platform_bounce_bonus: 10,

            initial_platform_count: 20,
            initial_moving_chance: 0.2,
            boost_floor_height: 200.0,
            initial_boosts: BoostTable {
                quadruple: 0.03,
                double: 0.10,
                rapid_fire: 0.05,
                auto_fire: 0.0,
                shield: 0.0,
            },

            generated_boosts: BoostTable {
                quadruple: 0.03,
                double: 0.10,
                rapid_fire: 0.05,
                auto_fire: 0.03,
                shield: 0.04,
            },
            type_chances_start: TypeChances {
                normal: 0.7,
                moving: 0.15,
                breaking: 0.15,
            },
            type_chances_horizon: TypeChances {
                normal: 0.4,
                moving: 0.3,
                breaking: 0.3,
            },
            difficulty_horizon: 10_000.0,
            min_gap: 40.0,
            max_gap: 140.0,
            gap_safety_start: 0.5,
            gap_safety_horizon: 0.8,
            min_platform_spacing: 20.0,
            boosted_gap_fraction: 0.7,
            generation_lookahead: 600.0,

            rapid_fire_ms: 5000.0,
            auto_fire_ms: 7000.0,
            shot_cooldown_ms: 500.0,
            rapid_shot_cooldown_ms: 200.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning (enemy chance {})", tuning.enemy_spawn_chance);
        Ok(tuning)
    }

    /// Reject values that would break generation guarantees
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("enemy_spawn_chance", self.enemy_spawn_chance)?;
        check_unit("initial_moving_chance", self.initial_moving_chance)?;
        check_positive("enemy_checkpoint", self.enemy_checkpoint)?;
        check_positive("difficulty_horizon", self.difficulty_horizon)?;
        check_positive("generation_lookahead", self.generation_lookahead)?;

        if self.initial_platform_count == 0 {
            return Err(ConfigError::OutOfRange {
                field: "initial_platform_count",
                value: 0.0,
            });
        }

        self.initial_boosts.validate("initial_boosts")?;
        self.generated_boosts.validate("generated_boosts")?;
        self.type_chances_start.validate("type_chances_start")?;
        self.type_chances_horizon.validate("type_chances_horizon")?;

        if self.min_platform_spacing <= PLATFORM_HEIGHT {
            return Err(ConfigError::OutOfRange {
                field: "min_platform_spacing",
                value: self.min_platform_spacing,
            });
        }
        check_positive("min_gap", self.min_gap)?;
        if self.max_gap < self.min_gap {
            return Err(ConfigError::OutOfRange {
                field: "max_gap",
                value: self.max_gap,
            });
        }
        for (field, fraction) in [
            ("gap_safety_start", self.gap_safety_start),
            ("gap_safety_horizon", self.gap_safety_horizon),
            ("boosted_gap_fraction", self.boosted_gap_fraction),
        ] {
            if fraction <= 0.0 || fraction > 1.0 {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: fraction,
                });
            }
        }
        if MAX_JUMP_HEIGHT * self.gap_safety_start < self.min_platform_spacing {
            return Err(ConfigError::OutOfRange {
                field: "gap_safety_start",
                value: self.gap_safety_start,
            });
        }

        for (field, ms) in [
            ("rapid_fire_ms", self.rapid_fire_ms),
            ("auto_fire_ms", self.auto_fire_ms),
            ("shot_cooldown_ms", self.shot_cooldown_ms),
            ("rapid_shot_cooldown_ms", self.rapid_shot_cooldown_ms),
        ] {
            check_positive(field, ms as f32)?;
        }
        Ok(())
    }
}

fn check_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}
