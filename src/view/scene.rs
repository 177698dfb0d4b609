//! Screen-space draw list and HUD built from a game state

use glam::Vec2;
use serde::Serialize;

use super::sprites::{SpriteCache, SpriteKey, Visual};
use crate::consts::*;
use crate::sim::{BuffKind, GameState};

/// Bob amplitude for hovering enemies (pixels)
const ENEMY_BOB_AMPLITUDE: f32 = 3.0;
/// Bob phase advance per animation tick (radians)
const ENEMY_BOB_RATE: f32 = 0.1;

/// One thing to draw. `pos` is the top-left corner in screen space (Y down).
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SpriteKey,
    pub visual: Visual,
    pub pos: Vec2,
    pub size: Vec2,
    pub alpha: f32,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub rapid_fire_ms_left: f64,
    pub auto_fire_ms_left: f64,
    pub shield: bool,
    /// Set once the run is over
    pub game_over: Option<&'static str>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let now = state.clock_ms;
        Self {
            score: state.score,
            lives: state.lives(),
            rapid_fire_ms_left: state.player.buff_remaining_ms(BuffKind::RapidFire, now),
            auto_fire_ms_left: state.player.buff_remaining_ms(BuffKind::AutoFire, now),
            shield: state.player.shield,
            game_over: state.game_over_reason().map(|reason| reason.message()),
        }
    }
}

/// Everything a renderer needs for one frame, back to front
#[derive(Debug, Clone)]
pub struct Scene {
    pub items: Vec<DrawItem>,
    pub hud: Hud,
}

impl Scene {
    pub fn build(state: &GameState, sprites: &mut SpriteCache) -> Self {
        let mut items = Vec::with_capacity(
            state.platforms.len() * 2 + state.enemies.len() + state.bullets.len() + 1,
        );
        let mut push = |key: SpriteKey, world_pos: Vec2, size: Vec2, alpha: f32| {
            items.push(DrawItem {
                key,
                visual: sprites.visual(key),
                pos: to_screen(state, world_pos, size),
                size,
                alpha,
            });
        };

        for platform in &state.platforms {
            let alpha = if platform.breaking {
                1.0 - platform.break_progress / BREAK_THRESHOLD
            } else {
                1.0
            };
            push(
                SpriteKey::Platform(platform.kind),
                platform.pos,
                Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
                alpha.clamp(0.0, 1.0),
            );
        }

        for boost in state.platforms.iter().filter_map(|p| p.boost.as_ref()) {
            if boost.collected {
                continue;
            }
            push(
                SpriteKey::Boost(boost.kind),
                boost.pos,
                Vec2::new(BOOST_WIDTH, BOOST_HEIGHT),
                1.0,
            );
        }

        for enemy in &state.enemies {
            let bob = (enemy.anim_phase as f32 * ENEMY_BOB_RATE).sin() * ENEMY_BOB_AMPLITUDE;
            push(
                SpriteKey::Enemy(enemy.kind),
                enemy.pos + Vec2::new(0.0, bob),
                Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
                1.0,
            );
        }

        for bullet in &state.bullets {
            let bounds = bullet.bounds();
            push(SpriteKey::Bullet, bounds.pos, bounds.size, 1.0);
        }

        push(SpriteKey::Player, state.player.pos, state.player.size, 1.0);

        Self {
            items,
            hud: Hud::from_state(state),
        }
    }
}

/// World bottom-left (Y up) to screen top-left (Y down)
fn to_screen(state: &GameState, world_pos: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(
        world_pos.x,
        GAME_HEIGHT - state.screen_y(world_pos.y + size.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Boost, BoostKind, GameOverReason, PlatformKind};

    #[test]
    fn test_player_drawn_last_in_screen_space() {
        let state = GameState::new(5);
        let mut sprites = SpriteCache::headless();
        let scene = Scene::build(&state, &mut sprites);

        let player = scene.items.last().unwrap();
        assert_eq!(player.key, SpriteKey::Player);
        let expected_y = GAME_HEIGHT - PLAYER_SPAWN_Y - PLAYER_HEIGHT;
        assert_eq!(player.pos, Vec2::new(PLAYER_SPAWN_X, expected_y));
        assert!(matches!(player.visual, Visual::Placeholder { .. }));
    }

    #[test]
    fn test_camera_shifts_items_down() {
        let mut state = GameState::new(5);
        let mut sprites = SpriteCache::headless();
        let before = Scene::build(&state, &mut sprites).items.last().unwrap().pos.y;
        state.camera_offset = 50.0;
        let after = Scene::build(&state, &mut sprites).items.last().unwrap().pos.y;
        assert_eq!(after - before, 50.0);
    }

    #[test]
    fn test_breaking_platform_fades() {
        let mut state = GameState::new(5);
        state.platforms[0].kind = PlatformKind::Breaking;
        state.platforms[0].breaking = true;
        state.platforms[0].break_progress = 0.25;
        let mut sprites = SpriteCache::headless();
        let scene = Scene::build(&state, &mut sprites);
        let start = &scene.items[0];
        assert_eq!(start.key, SpriteKey::Platform(PlatformKind::Breaking));
        assert!((start.alpha - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_collected_boosts_are_hidden() {
        let mut state = GameState::new(5);
        for platform in &mut state.platforms {
            platform.boost = None;
        }
        let pos = state.platforms[0].pos;
        state.platforms[0].boost = Some(Boost::on_platform(BoostKind::Double, pos));
        let mut sprites = SpriteCache::headless();

        let count = |scene: &Scene| {
            scene
                .items
                .iter()
                .filter(|i| matches!(i.key, SpriteKey::Boost(_)))
                .count()
        };
        assert_eq!(count(&Scene::build(&state, &mut sprites)), 1);

        if let Some(boost) = state.platforms[0].boost.as_mut() {
            boost.collected = true;
        }
        assert_eq!(count(&Scene::build(&state, &mut sprites)), 0);
    }

    #[test]
    fn test_hud_reports_buffs_and_game_over() {
        let mut state = GameState::new(5);
        state.clock_ms = 1000.0;
        state.player.activate_rapid_fire(1000.0, 5000.0);
        state.player.activate_shield();
        let hud = Hud::from_state(&state);
        assert_eq!(hud.rapid_fire_ms_left, 5000.0);
        assert_eq!(hud.auto_fire_ms_left, 0.0);
        assert!(hud.shield);
        assert_eq!(hud.lives, STARTING_LIVES);
        assert_eq!(hud.game_over, None);

        state.end(GameOverReason::LivesExhausted);
        assert_eq!(Hud::from_state(&state).game_over, Some("lives exhausted"));
    }
}
