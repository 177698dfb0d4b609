//! Procedural platform and enemy generation
//!
//! Platforms are placed bottom-up, each one a "gap" above the last. Gaps grow
//! with height but never beyond what a base jump can clear, and platform mix
//! shifts from normal toward moving/breaking over the difficulty horizon.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boost::Boost;
use super::enemy::{Enemy, EnemyKind};
use super::platform::{Platform, PlatformKind};
use super::state::GameState;
use crate::consts::*;
use crate::lerp_clamped;
use crate::tuning::{TypeChances, Tuning};

/// Bookkeeping the generator carries between batches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorState {
    /// Height of the highest platform placed so far
    pub frontier: f32,
    /// Type of the highest platform
    pub last_kind: PlatformKind,
    /// Whether the highest platform carries a boost
    pub last_had_boost: bool,
    /// Last enemy checkpoint rolled
    pub enemy_checkpoint: u32,
}

/// Difficulty progress in [0, 1] at a given height
pub fn difficulty(height: f32, tuning: &Tuning) -> f32 {
    (height / tuning.difficulty_horizon).clamp(0.0, 1.0)
}

/// Largest gap allowed at this height
pub fn max_safe_gap(height: f32, tuning: &Tuning) -> f32 {
    let fraction = lerp_clamped(
        tuning.gap_safety_start,
        tuning.gap_safety_horizon,
        difficulty(height, tuning),
    );
    MAX_JUMP_HEIGHT * fraction
}

/// Vertical gap to leave above a platform at `height`.
///
/// Grows linearly from `min_gap` to `max_gap` over the difficulty horizon,
/// capped at a safe fraction of the base jump apex, floored at the minimum
/// spacing so platforms never overlap.
pub fn calculate_platform_gap(height: f32, tuning: &Tuning) -> f32 {
    let gap = lerp_clamped(tuning.min_gap, tuning.max_gap, difficulty(height, tuning));
    gap.min(max_safe_gap(height, tuning))
        .max(tuning.min_platform_spacing)
}

/// Platform type odds at this height
pub fn platform_type_chances(height: f32, tuning: &Tuning) -> TypeChances {
    tuning
        .type_chances_start
        .lerp(&tuning.type_chances_horizon, difficulty(height, tuning))
}

/// Largest gap a breaking platform's weaker bounce can still clear
fn max_gap_after_breaking(height: f32, tuning: &Tuning) -> f32 {
    let apex = MAX_JUMP_HEIGHT * BREAKING_BOUNCE * BREAKING_BOUNCE;
    max_safe_gap(height, tuning)
        .min(apex * 0.9)
        .max(tuning.min_platform_spacing)
}

fn random_platform_x(state: &mut GameState) -> f32 {
    state.rng.random_range(0.0..=GAME_WIDTH - PLATFORM_WIDTH)
}

/// Seed the opening layout: the start platform under the spawn column, then
/// evenly spaced platforms climbing from the spawn height.
pub fn generate_initial_platforms(state: &mut GameState) {
    let count = state.tuning.initial_platform_count.max(1);
    // The first gap spans start platform -> spawn height -> one spacing
    let lead_in = PLAYER_SPAWN_Y - START_PLATFORM_Y;
    let spacing = (GAME_HEIGHT / count as f32)
        .min(max_safe_gap(START_PLATFORM_Y, &state.tuning) - lead_in)
        .max(state.tuning.min_platform_spacing);

    let id = state.next_entity_id();
    state.platforms.push(Platform::new(
        id,
        Vec2::new(START_PLATFORM_X, START_PLATFORM_Y),
        PlatformKind::Normal,
    ));

    let mut last = (START_PLATFORM_Y, PlatformKind::Normal, false);
    for i in 1..count {
        let y = PLAYER_SPAWN_Y + spacing * i as f32;
        let x = random_platform_x(state);
        let kind = if state.rng.random::<f32>() < state.tuning.initial_moving_chance {
            PlatformKind::Moving
        } else {
            PlatformKind::Normal
        };

        let id = state.next_entity_id();
        let mut platform = Platform::new(id, Vec2::new(x, y), kind);
        if kind == PlatformKind::Normal && y > state.tuning.boost_floor_height {
            let roll = state.rng.random::<f32>();
            platform.boost = state
                .tuning
                .initial_boosts
                .pick(roll)
                .map(|boost| Boost::on_platform(boost, platform.pos));
        }
        last = (y, kind, platform.boost.is_some());
        state.platforms.push(platform);
    }

    state.generator = GeneratorState {
        frontier: last.0,
        last_kind: last.1,
        last_had_boost: last.2,
        enemy_checkpoint: state.generator.enemy_checkpoint,
    };
    log::debug!(
        "Initial layout: {} platforms up to {:.0}",
        state.platforms.len(),
        last.0
    );
}

/// Place one platform above the frontier
fn place_next_platform(state: &mut GameState) {
    let frontier = state.generator.frontier;
    // Vary spacing, only ever downward so the cap still holds
    let jitter = state.rng.random_range(0.85..=1.0f32);
    let tuning = &state.tuning;
    let mut gap =
        (calculate_platform_gap(frontier, tuning) * jitter).max(tuning.min_platform_spacing);

    if state.generator.last_kind == PlatformKind::Breaking {
        gap = gap.min(max_gap_after_breaking(frontier, tuning));
    }
    if state.generator.last_had_boost {
        gap = gap.max(tuning.boosted_gap_fraction * MAX_JUMP_HEIGHT);
    }

    let y = frontier + gap;
    let kind = if state.generator.last_kind == PlatformKind::Breaking {
        PlatformKind::Normal
    } else {
        let roll = state.rng.random::<f32>();
        platform_type_chances(y, &state.tuning).pick(roll)
    };
    let x = random_platform_x(state);

    let id = state.next_entity_id();
    let mut platform = Platform::new(id, Vec2::new(x, y), kind);
    if kind == PlatformKind::Normal && y > state.tuning.boost_floor_height {
        let roll = state.rng.random::<f32>();
        platform.boost = state
            .tuning
            .generated_boosts
            .pick(roll)
            .map(|boost| Boost::on_platform(boost, platform.pos));
    }

    state.generator.frontier = y;
    state.generator.last_kind = kind;
    state.generator.last_had_boost = platform.boost.is_some();
    state.platforms.push(platform);
}

/// Keep the platform frontier a lookahead above the top of the view
pub fn extend_platforms(state: &mut GameState) {
    let target = state.camera_offset + GAME_HEIGHT + state.tuning.generation_lookahead;
    let mut placed = 0;
    while state.generator.frontier < target {
        place_next_platform(state);
        placed += 1;
    }
    if placed > 0 {
        log::debug!(
            "Generated {} platforms, frontier now {:.0}",
            placed,
            state.generator.frontier
        );
    }
}

/// Roll for an enemy once per fresh checkpoint above the spawn floor
pub fn maybe_spawn_enemy(state: &mut GameState) {
    if state.max_height <= state.tuning.enemy_spawn_floor {
        return;
    }
    let checkpoint = (state.max_height / state.tuning.enemy_checkpoint).floor() as u32;
    if checkpoint <= state.generator.enemy_checkpoint {
        return;
    }
    state.generator.enemy_checkpoint = checkpoint;

    if !state.rng.random_bool(state.tuning.enemy_spawn_chance as f64) {
        return;
    }

    let kind = if state.rng.random_bool(0.5) {
        EnemyKind::Static
    } else {
        EnemyKind::Moving
    };
    let x = state.rng.random_range(0.0..=GAME_WIDTH - ENEMY_WIDTH);
    let y = state.player.pos.y + GAME_HEIGHT;
    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(id, Vec2::new(x, y), kind));
    log::debug!("Spawned {:?} enemy at checkpoint {}", kind, checkpoint);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_at_low_height_is_half_jump() {
        let tuning = Tuning::default();
        assert!((MAX_JUMP_HEIGHT - 180.0).abs() < 1e-3);
        for height in [0.0, 100.0, 500.0, 1000.0] {
            let gap = calculate_platform_gap(height, &tuning);
            assert!(gap <= 0.5 * 180.0 + 1.0, "gap {} at {}", gap, height);
        }
    }

    #[test]
    fn test_gap_grows_and_stays_capped() {
        let tuning = Tuning::default();
        let mut last = 0.0;
        for step in 0..=40 {
            let height = step as f32 * 500.0;
            let gap = calculate_platform_gap(height, &tuning);
            assert!(gap >= last);
            assert!(gap <= max_safe_gap(height, &tuning));
            assert!(gap < MAX_JUMP_HEIGHT);
            assert!(gap >= tuning.min_platform_spacing);
            last = gap;
        }
    }

    #[test]
    fn test_min_spacing_floor() {
        let tuning = Tuning {
            min_gap: 1.0,
            max_gap: 2.0,
            ..Tuning::default()
        };
        assert_eq!(calculate_platform_gap(0.0, &tuning), tuning.min_platform_spacing);
    }

    #[test]
    fn test_type_chances_shift_with_height() {
        let tuning = Tuning::default();
        let low = platform_type_chances(0.0, &tuning);
        let high = platform_type_chances(tuning.difficulty_horizon * 2.0, &tuning);
        assert!(high.normal < low.normal);
        assert!(high.moving > low.moving);
        assert!(high.breaking > low.breaking);
        assert_eq!(high, tuning.type_chances_horizon);
    }

    #[test]
    fn test_initial_layout_climbs_monotonically() {
        let state = GameState::new(42);
        for pair in state.platforms.windows(2) {
            let gap = pair[1].pos.y - pair[0].pos.y;
            assert!(gap > PLATFORM_HEIGHT);
            assert!(gap <= 0.5 * MAX_JUMP_HEIGHT);
        }
        assert!(
            state
                .platforms
                .iter()
                .all(|p| p.kind != PlatformKind::Breaking)
        );
    }

    #[test]
    fn test_initial_boosts_only_on_high_normal_platforms() {
        for seed in 0..50 {
            let state = GameState::new(seed);
            for platform in &state.platforms {
                if platform.boost.is_some() {
                    assert_eq!(platform.kind, PlatformKind::Normal);
                    assert!(platform.pos.y > state.tuning.boost_floor_height);
                }
            }
        }
    }

    #[test]
    fn test_extension_rules() {
        for seed in 0..20 {
            let mut state = GameState::new(seed);
            state.camera_offset = 20_000.0;
            extend_platforms(&mut state);
            assert!(state.generator.frontier >= state.camera_offset + GAME_HEIGHT);

            for pair in state.platforms.windows(2) {
                let (below, above) = (&pair[0], &pair[1]);
                let gap = above.pos.y - below.pos.y;
                assert!(gap > PLATFORM_HEIGHT);
                assert!(gap <= MAX_JUMP_HEIGHT, "gap {} too large", gap);
                if below.kind == PlatformKind::Breaking {
                    assert_eq!(above.kind, PlatformKind::Normal);
                }
                // Opening layout is evenly spaced; the stretch applies to generated platforms
                let generated = below.id as usize >= state.tuning.initial_platform_count;
                if below.boost.is_some() && generated {
                    assert!(gap >= state.tuning.boosted_gap_fraction * MAX_JUMP_HEIGHT - 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_no_enemies_below_floor() {
        let mut state = GameState::new(5);
        state.tuning.enemy_spawn_chance = 1.0;
        state.max_height = 2999.0;
        maybe_spawn_enemy(&mut state);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_one_roll_per_checkpoint() {
        let mut state = GameState::new(5);
        state.tuning.enemy_spawn_chance = 1.0;
        state.max_height = 3100.0;
        maybe_spawn_enemy(&mut state);
        assert_eq!(state.enemies.len(), 1);

        // Same band, many ticks: no further spawns
        for _ in 0..10 {
            state.max_height += 10.0;
            maybe_spawn_enemy(&mut state);
        }
        assert_eq!(state.enemies.len(), 1);

        state.max_height = 3500.0;
        maybe_spawn_enemy(&mut state);
        assert_eq!(state.enemies.len(), 2);

        let enemy = &state.enemies[0];
        assert_eq!(enemy.pos.y, state.player.pos.y + GAME_HEIGHT);
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let mut state = GameState::new(5);
        state.tuning.enemy_spawn_chance = 0.0;
        for step in 0..50 {
            state.max_height = 3000.0 + step as f32 * 500.0;
            maybe_spawn_enemy(&mut state);
        }
        assert!(state.enemies.is_empty());
    }
}
