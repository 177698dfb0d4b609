//! Sprite lookup with a placeholder fallback

use std::collections::HashMap;

use thiserror::Error;

use crate::sim::{BoostKind, EnemyKind, PlatformKind};

/// Everything the scene can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Player,
    Platform(PlatformKind),
    Boost(BoostKind),
    Enemy(EnemyKind),
    Bullet,
}

impl SpriteKey {
    /// Asset name handed to the `SpriteSource`
    pub fn asset_name(self) -> &'static str {
        match self {
            SpriteKey::Player => "player",
            SpriteKey::Platform(PlatformKind::Normal) => "platform_normal",
            SpriteKey::Platform(PlatformKind::Moving) => "platform_moving",
            SpriteKey::Platform(PlatformKind::Breaking) => "platform_breaking",
            SpriteKey::Boost(BoostKind::Double) => "boost_double",
            SpriteKey::Boost(BoostKind::Quadruple) => "boost_quadruple",
            SpriteKey::Boost(BoostKind::RapidFire) => "boost_rapid_fire",
            SpriteKey::Boost(BoostKind::AutoFire) => "boost_auto_fire",
            SpriteKey::Boost(BoostKind::Shield) => "boost_shield",
            SpriteKey::Enemy(EnemyKind::Static) => "enemy_static",
            SpriteKey::Enemy(EnemyKind::Moving) => "enemy_moving",
            SpriteKey::Bullet => "bullet",
        }
    }

    /// Flat color drawn when the sprite can't be loaded
    pub fn placeholder_color(self) -> [f32; 4] {
        match self {
            SpriteKey::Player => [0.3, 0.8, 0.3, 1.0],
            SpriteKey::Platform(PlatformKind::Normal) => [0.4, 0.7, 0.2, 1.0],
            SpriteKey::Platform(PlatformKind::Moving) => [0.2, 0.5, 0.9, 1.0],
            SpriteKey::Platform(PlatformKind::Breaking) => [0.6, 0.4, 0.2, 1.0],
            SpriteKey::Boost(BoostKind::Double) => [1.0, 0.8, 0.2, 1.0],
            SpriteKey::Boost(BoostKind::Quadruple) => [1.0, 0.5, 0.1, 1.0],
            SpriteKey::Boost(BoostKind::RapidFire) => [0.9, 0.2, 0.2, 1.0],
            SpriteKey::Boost(BoostKind::AutoFire) => [0.8, 0.2, 0.8, 1.0],
            SpriteKey::Boost(BoostKind::Shield) => [0.3, 0.9, 1.0, 1.0],
            SpriteKey::Enemy(_) => [0.8, 0.1, 0.1, 1.0],
            SpriteKey::Bullet => [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// How to draw one item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    /// Opaque handle returned by the host's `SpriteSource`
    Sprite { handle: u32 },
    Placeholder { color: [f32; 4] },
}

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("sprite '{0}' not found")]
    NotFound(String),

    #[error("failed to decode sprite '{name}': {reason}")]
    Decode { name: String, reason: String },
}

/// Host-side asset loader
pub trait SpriteSource {
    /// Load the named sprite, returning a handle the host can draw with
    fn load(&mut self, name: &str) -> Result<u32, SpriteError>;
}

/// A source with no assets; everything draws as a placeholder
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSprites;

impl SpriteSource for NoSprites {
    fn load(&mut self, name: &str) -> Result<u32, SpriteError> {
        Err(SpriteError::NotFound(name.to_string()))
    }
}

/// Resolves each `SpriteKey` once and remembers the answer, hit or miss
pub struct SpriteCache {
    source: Box<dyn SpriteSource>,
    resolved: HashMap<SpriteKey, Visual>,
}

impl SpriteCache {
    pub fn new(source: impl SpriteSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            resolved: HashMap::new(),
        }
    }

    /// Cache for hosts that draw placeholders only
    pub fn headless() -> Self {
        Self::new(NoSprites)
    }

    /// Visual for `key`, loading it on first use
    pub fn visual(&mut self, key: SpriteKey) -> Visual {
        if let Some(visual) = self.resolved.get(&key) {
            return *visual;
        }

        let visual = match self.source.load(key.asset_name()) {
            Ok(handle) => {
                log::debug!("Loaded sprite {}", key.asset_name());
                Visual::Sprite { handle }
            }
            Err(e) => {
                log::warn!("{} - drawing placeholder", e);
                Visual::Placeholder {
                    color: key.placeholder_color(),
                }
            }
        };
        self.resolved.insert(key, visual);
        visual
    }

    /// Number of keys resolved so far
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Serves only the player sprite and counts load attempts
    struct CountingSource {
        loads: Rc<Cell<u32>>,
    }

    impl SpriteSource for CountingSource {
        fn load(&mut self, name: &str) -> Result<u32, SpriteError> {
            self.loads.set(self.loads.get() + 1);
            if name == "player" {
                Ok(7)
            } else {
                Err(SpriteError::Decode {
                    name: name.to_string(),
                    reason: "truncated".to_string(),
                })
            }
        }
    }

    #[test]
    fn test_hits_and_misses_are_cached() {
        let loads = Rc::new(Cell::new(0));
        let mut cache = SpriteCache::new(CountingSource {
            loads: Rc::clone(&loads),
        });

        assert_eq!(cache.visual(SpriteKey::Player), Visual::Sprite { handle: 7 });
        assert_eq!(cache.visual(SpriteKey::Player), Visual::Sprite { handle: 7 });
        assert_eq!(loads.get(), 1);

        let key = SpriteKey::Boost(BoostKind::Shield);
        let expected = Visual::Placeholder {
            color: key.placeholder_color(),
        };
        assert_eq!(cache.visual(key), expected);
        assert_eq!(cache.visual(key), expected);
        assert_eq!(loads.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_asset_names_are_distinct() {
        let mut keys = vec![SpriteKey::Player, SpriteKey::Bullet];
        let platform_kinds = [PlatformKind::Normal, PlatformKind::Moving, PlatformKind::Breaking];
        keys.extend(platform_kinds.map(SpriteKey::Platform));
        keys.extend(BoostKind::ALL.map(SpriteKey::Boost));
        keys.extend([EnemyKind::Static, EnemyKind::Moving].map(SpriteKey::Enemy));

        let mut names: Vec<_> = keys.iter().map(|k| k.asset_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), keys.len());
    }
}
