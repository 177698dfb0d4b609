//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The order of the
//! steps below is part of the contract; reordering changes outcomes.

use std::cmp::Ordering;

use super::collision::{
    bullet_enemy_collision, handle_boost_pickup, handle_enemy_collision, handle_platform_collision,
    player_enemy_collision, player_platform_collision,
};
use super::enemy::Bullet;
use super::generator;
use super::state::{GameOverReason, GameState};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Fire (held or edge, the cooldown rate-limits either way)
    pub shoot: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed tick.
///
/// `elapsed_ms` advances the host clock used by buff expiry and the shooting
/// cooldown. Physics is per tick and ignores it.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) {
    if state.is_game_over() {
        return;
    }

    state.time_ticks += 1;
    state.clock_ms += elapsed_ms.max(0.0) as f64;
    let now = state.clock_ms;

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    // 1. Player
    state.player.advance(input.left, input.right);

    // 2. One-way camera
    state.camera_offset = state
        .camera_offset
        .max(state.player.pos.y - GAME_HEIGHT / 2.0);

    // 3. Fell out of view
    if state.screen_y(state.player.pos.y) < 0.0 {
        state.end(GameOverReason::FellDown);
        return;
    }

    // 4. Bootstrap
    if state.platforms.is_empty() {
        generator::generate_initial_platforms(state);
    }

    // 5. Platforms: at most one bounce per tick, first in id order
    for platform in &mut state.platforms {
        platform.advance();
    }
    let landed = state
        .platforms
        .iter()
        .position(|p| player_platform_collision(&state.player, p));
    if let Some(idx) = landed {
        let platform = &mut state.platforms[idx];
        let bounce = handle_platform_collision(&mut state.player, platform, now, &state.tuning);
        if !platform.bounced {
            platform.bounced = true;
            state.bounce_points += state.tuning.platform_bounce_bonus;
        }
        if bounce.should_break {
            log::debug!("Platform {} breaking", platform.id);
        }
        if let Some(kind) = bounce.boost {
            log::debug!("Collected {:?} boost on platform {}", kind, platform.id);
        }
    }

    // 6. Height and score
    if state.player.pos.y > state.max_height {
        state.max_height = state.player.pos.y;
        state.height_points = (state.max_height - PLAYER_SPAWN_Y).max(0.0).floor() as u64;
    }
    state.score = state.score.max(state.height_points + state.bounce_points);

    // 7. Enemies
    let mut defeated = Vec::new();
    let mut killed = false;
    for enemy in &mut state.enemies {
        enemy.advance();
    }
    for enemy in &state.enemies {
        let contact = player_enemy_collision(&state.player, enemy);
        if !contact.hit {
            continue;
        }
        let outcome = handle_enemy_collision(&mut state.player, contact);
        log::debug!("Enemy {} contact: {:?}", enemy.id, outcome);
        if !outcome.removes_enemy() {
            killed = true;
            break;
        }
        defeated.push(enemy.id);
    }
    if killed {
        state.end(GameOverReason::LivesExhausted);
        return;
    }

    // 8. Eviction
    let floor = state.player.pos.y - GAME_HEIGHT;
    state
        .enemies
        .retain(|e| !defeated.contains(&e.id) && e.pos.y >= floor);
    state
        .platforms
        .retain(|p| !p.is_broken() && p.pos.y >= floor);

    // 9. Generation ahead of the player
    generator::extend_platforms(state);
    generator::maybe_spawn_enemy(state);

    // 10. Bullets
    for bullet in &mut state.bullets {
        bullet.advance();
    }
    let view_bottom = state.camera_offset;
    let view_top = state.camera_offset + GAME_HEIGHT;
    state
        .bullets
        .retain(|b| b.pos.y - b.radius <= view_top && b.pos.y + b.radius >= view_bottom);

    let mut spent = Vec::new();
    let mut shot_down = Vec::new();
    for bullet in &state.bullets {
        let target = state
            .enemies
            .iter()
            .find(|e| !shot_down.contains(&e.id) && bullet_enemy_collision(bullet, e));
        if let Some(enemy) = target {
            spent.push(bullet.id);
            shot_down.push(enemy.id);
        }
    }
    state.bullets.retain(|b| !spent.contains(&b.id));
    state.enemies.retain(|e| !shot_down.contains(&e.id));

    // 11. Shooting
    let wants_fire = input.shoot || state.player.auto_fire;
    if wants_fire {
        let cooldown = if state.player.rapid_fire || state.player.auto_fire {
            state.tuning.rapid_shot_cooldown_ms
        } else {
            state.tuning.shot_cooldown_ms
        };
        let ready = state.last_shot_ms.is_none_or(|last| now - last >= cooldown);
        if ready {
            let id = state.next_entity_id();
            state.bullets.push(Bullet::new(id, state.player.muzzle()));
            state.last_shot_ms = Some(now);
            state.shots_fired += 1;
        }
    }

    // 12. Timed buffs
    state.player.update_boosts(now);

    // 13. Standalone pickups
    for platform in &mut state.platforms {
        if let Some(boost) = platform.boost.as_mut() {
            if let Some(kind) = handle_boost_pickup(&mut state.player, boost, now, &state.tuning) {
                log::debug!("Picked up {:?} boost", kind);
            }
        }
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Demo-mode input: steer toward the best platform in reach, shoot what's above
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let feet = player.pos.y;
    let apex = if player.vel.y > 0.0 {
        feet + player.vel.y * player.vel.y / (2.0 * GRAVITY)
    } else {
        feet
    };

    // Highest solid platform the current arc can still land on
    let target = state
        .platforms
        .iter()
        .filter(|p| p.is_solid() && p.top() <= apex && p.top() >= feet - GAME_HEIGHT / 2.0)
        .max_by(|a, b| a.top().partial_cmp(&b.top()).unwrap_or(Ordering::Equal));

    let mut input = TickInput::default();
    if let Some(platform) = target {
        let platform_center = platform.bounds().center().x;
        let player_center = player.bounds().center().x;
        let dx = platform_center - player_center;
        if dx.abs() > MOVE_SPEED {
            input.left = dx < 0.0;
            input.right = dx > 0.0;
        }
    }

    let player_box = player.bounds();
    input.shoot = state
        .enemies
        .iter()
        .any(|e| e.pos.y > feet && player_box.overlaps_x(&e.bounds()));
    input
}
