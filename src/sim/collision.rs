//! Collision predicates and their resolution
//!
//! The `*_collision` functions are pure: they look at two entities and answer
//! whether they touch. The `handle_*` functions are the only places that change
//! entity state because of a contact.

use serde::{Deserialize, Serialize};

use super::boost::{Boost, BoostEffect, BoostKind, BuffKind};
use super::enemy::{Bullet, Enemy};
use super::geom::feet_on_surface;
use super::platform::Platform;
use super::player::Player;
use crate::consts::*;
use crate::tuning::Tuning;

/// Result of a player/enemy contact check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemyContact {
    /// Boxes overlap
    pub hit: bool,
    /// Player came down on the enemy's head
    pub from_top: bool,
}

/// Outcome of resolving a player/enemy contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyOutcome {
    /// Landed on its head
    Stomped,
    /// Side or bottom hit absorbed by the shield
    Shielded,
    /// Lost a life, lives remain
    Hurt,
    /// Lost the last life
    Killed,
}

impl EnemyOutcome {
    /// Whether the enemy is gone after this contact
    pub fn removes_enemy(self) -> bool {
        !matches!(self, EnemyOutcome::Killed)
    }
}

/// Summary of a resolved platform bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformBounce {
    /// Vertical velocity given to the player
    pub impulse: f32,
    /// The platform started breaking
    pub should_break: bool,
    /// Boost collected during the bounce
    pub boost: Option<BoostKind>,
}

/// Falling player's feet on a solid platform's top, with horizontal overlap
pub fn player_platform_collision(player: &Player, platform: &Platform) -> bool {
    if player.vel.y >= 0.0 || !platform.is_solid() {
        return false;
    }
    player.bounds().overlaps_x(&platform.bounds())
        && feet_on_surface(player.pos.y, player.vel.y, platform.top(), CONTACT_TOLERANCE)
}

/// Player touching an uncollected boost: horizontal overlap, feet near its base
pub fn player_boost_collision(player: &Player, boost: &Boost) -> bool {
    if boost.collected {
        return false;
    }
    player.bounds().overlaps_x(&boost.bounds())
        && (player.pos.y - boost.pos.y).abs() < BOOST_TOLERANCE
}

/// Full overlap check, flagging stomps from above
pub fn player_enemy_collision(player: &Player, enemy: &Enemy) -> EnemyContact {
    let hit = player.bounds().intersects(&enemy.bounds());
    let from_top = hit
        && player.vel.y < 0.0
        && feet_on_surface(player.pos.y, player.vel.y, enemy.top(), CONTACT_TOLERANCE);
    EnemyContact { hit, from_top }
}

pub fn bullet_enemy_collision(bullet: &Bullet, enemy: &Enemy) -> bool {
    bullet.bounds().intersects(&enemy.bounds())
}

/// Apply a boost's effect to the player.
///
/// Returns the impulse multiplier it contributes (1.0 for non-impulse boosts).
pub fn apply_boost_effect(
    player: &mut Player,
    effect: BoostEffect,
    now_ms: f64,
    tuning: &Tuning,
) -> f32 {
    match effect {
        BoostEffect::Impulse(multiplier) => multiplier,
        BoostEffect::Buff(buff) => {
            let duration = match buff {
                BuffKind::RapidFire => tuning.rapid_fire_ms,
                BuffKind::AutoFire => tuning.auto_fire_ms,
            };
            player.activate_buff(buff, now_ms, duration);
            1.0
        }
        BoostEffect::Shield => {
            player.activate_shield();
            1.0
        }
    }
}

/// Resolve a bounce on `platform`.
///
/// The attached boost is resolved first and can multiply the impulse; the
/// platform type multiplier applies on top. Clears the jump guard, applies the
/// jump, rests the feet on the platform and starts a break if applicable.
pub fn handle_platform_collision(
    player: &mut Player,
    platform: &mut Platform,
    now_ms: f64,
    tuning: &Tuning,
) -> PlatformBounce {
    let mut impulse = JUMP_FORCE;
    let mut collected = None;

    if let Some(boost) = platform.boost.as_mut() {
        if player_boost_collision(player, boost) {
            if let Some(effect) = boost.collect() {
                impulse *= apply_boost_effect(player, effect, now_ms, tuning);
                collected = Some(boost.kind);
            }
        }
    }

    impulse *= platform.kind.bounce_multiplier();
    let should_break = platform.trigger_break();

    player.pos.y = platform.top();
    player.land();
    player.jump(impulse);

    PlatformBounce {
        impulse,
        should_break,
        boost: collected,
    }
}

/// Standalone pickup of a non-impulse boost (not via a bounce)
pub fn handle_boost_pickup(
    player: &mut Player,
    boost: &mut Boost,
    now_ms: f64,
    tuning: &Tuning,
) -> Option<BoostKind> {
    if boost.kind.is_impulse() || !player_boost_collision(player, boost) {
        return None;
    }
    let effect = boost.collect()?;
    apply_boost_effect(player, effect, now_ms, tuning);
    Some(boost.kind)
}

/// Resolve a player/enemy contact that `player_enemy_collision` reported as a hit
pub fn handle_enemy_collision(player: &mut Player, contact: EnemyContact) -> EnemyOutcome {
    let outcome = if contact.from_top {
        EnemyOutcome::Stomped
    } else if player.consume_shield() {
        EnemyOutcome::Shielded
    } else if player.lose_life() {
        return EnemyOutcome::Killed;
    } else {
        EnemyOutcome::Hurt
    };

    let force = match outcome {
        EnemyOutcome::Hurt => JUMP_FORCE * HURT_BOUNCE,
        _ => JUMP_FORCE,
    };
    player.land();
    player.jump(force);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyKind;
    use crate::sim::platform::PlatformKind;
    use glam::Vec2;

    fn platform_at(kind: PlatformKind) -> Platform {
        Platform::new(1, Vec2::new(100.0, 200.0), kind)
    }

    /// Player falling with feet just above the platform top
    fn falling_onto(platform: &Platform) -> Player {
        let mut player = Player::default();
        player.pos = Vec2::new(platform.pos.x + 10.0, platform.top() + 2.0);
        player.vel = Vec2::new(0.0, -4.0);
        player.jumping = true;
        player
    }

    #[test]
    fn test_platform_only_while_falling() {
        let platform = platform_at(PlatformKind::Normal);
        let mut player = falling_onto(&platform);
        assert!(player_platform_collision(&player, &platform));

        player.vel.y = 3.0;
        assert!(!player_platform_collision(&player, &platform));
        player.vel.y = 0.0;
        assert!(!player_platform_collision(&player, &platform));
    }

    #[test]
    fn test_platform_needs_horizontal_overlap() {
        let platform = platform_at(PlatformKind::Normal);
        let mut player = falling_onto(&platform);
        player.pos.x = platform.pos.x + PLATFORM_WIDTH;
        assert!(!player_platform_collision(&player, &platform));
        player.pos.x = platform.pos.x - PLAYER_WIDTH;
        assert!(!player_platform_collision(&player, &platform));
    }

    #[test]
    fn test_breaking_platform_not_solid_once_triggered() {
        let mut platform = platform_at(PlatformKind::Breaking);
        let player = falling_onto(&platform);
        assert!(player_platform_collision(&player, &platform));
        platform.trigger_break();
        assert!(!player_platform_collision(&player, &platform));
    }

    #[test]
    fn test_bounce_multipliers_by_type() {
        for (kind, expected) in [
            (PlatformKind::Normal, JUMP_FORCE),
            (PlatformKind::Moving, JUMP_FORCE * 1.2),
            (PlatformKind::Breaking, JUMP_FORCE * 0.7),
        ] {
            let mut platform = platform_at(kind);
            let mut player = falling_onto(&platform);
            let bounce =
                handle_platform_collision(&mut player, &mut platform, 0.0, &Tuning::default());
            assert!((bounce.impulse - expected).abs() < 1e-4);
            assert!((player.vel.y - expected).abs() < 1e-4);
            assert!(player.jumping);
            assert_eq!(bounce.should_break, kind == PlatformKind::Breaking);
            assert_eq!(player.pos.y, platform.top());
        }
    }

    #[test]
    fn test_quadruple_boost_bounce() {
        let mut platform = platform_at(PlatformKind::Normal);
        platform.boost = Some(Boost::on_platform(BoostKind::Quadruple, platform.pos));
        let mut player = falling_onto(&platform);

        let bounce = handle_platform_collision(&mut player, &mut platform, 0.0, &Tuning::default());
        assert_eq!(bounce.boost, Some(BoostKind::Quadruple));
        assert!((bounce.impulse - JUMP_FORCE * 4.0).abs() < 1e-4);
        assert!(platform.boost.as_ref().unwrap().collected);

        // Collected boosts never pay out again
        let mut player = falling_onto(&platform);
        let bounce = handle_platform_collision(&mut player, &mut platform, 0.0, &Tuning::default());
        assert_eq!(bounce.boost, None);
        assert!((bounce.impulse - JUMP_FORCE).abs() < 1e-4);
    }

    #[test]
    fn test_boost_missed_when_landing_on_platform_edge() {
        let mut platform = platform_at(PlatformKind::Normal);
        platform.boost = Some(Boost::on_platform(BoostKind::Double, platform.pos));
        let mut player = falling_onto(&platform);
        // Overhang the left edge so the player never reaches the centred boost
        player.pos.x = platform.pos.x - PLAYER_WIDTH + 5.0;

        let bounce = handle_platform_collision(&mut player, &mut platform, 0.0, &Tuning::default());
        assert_eq!(bounce.boost, None);
        assert!(!platform.boost.as_ref().unwrap().collected);
    }

    #[test]
    fn test_rapid_fire_boost_via_bounce_keeps_base_impulse() {
        let mut platform = platform_at(PlatformKind::Normal);
        platform.boost = Some(Boost::on_platform(BoostKind::RapidFire, platform.pos));
        let mut player = falling_onto(&platform);

        let bounce =
            handle_platform_collision(&mut player, &mut platform, 1000.0, &Tuning::default());
        assert!((bounce.impulse - JUMP_FORCE).abs() < 1e-4);
        assert!(player.rapid_fire);
        assert_eq!(player.rapid_fire_until_ms, 6000.0);
    }

    #[test]
    fn test_standalone_pickup_ignores_impulse_boosts() {
        let mut player = Player::default();
        let mut boost = Boost::new(BoostKind::Double, player.pos);
        assert_eq!(handle_boost_pickup(&mut player, &mut boost, 0.0, &Tuning::default()), None);
        assert!(!boost.collected);

        let mut boost = Boost::new(BoostKind::Shield, player.pos);
        assert_eq!(
            handle_boost_pickup(&mut player, &mut boost, 0.0, &Tuning::default()),
            Some(BoostKind::Shield)
        );
        assert!(player.shield);
        assert_eq!(handle_boost_pickup(&mut player, &mut boost, 0.0, &Tuning::default()), None);
    }

    fn enemy_under_feet(player: &Player) -> Enemy {
        Enemy::new(1, Vec2::new(player.pos.x, player.pos.y - ENEMY_HEIGHT + 3.0), EnemyKind::Static)
    }

    #[test]
    fn test_enemy_stomp() {
        let mut player = Player::default();
        player.vel.y = -5.0;
        player.jumping = true;
        let enemy = enemy_under_feet(&player);

        let contact = player_enemy_collision(&player, &enemy);
        assert!(contact.hit && contact.from_top);
        assert_eq!(handle_enemy_collision(&mut player, contact), EnemyOutcome::Stomped);
        assert_eq!(player.lives, STARTING_LIVES);
        assert_eq!(player.vel.y, JUMP_FORCE);
    }

    #[test]
    fn test_enemy_side_hit_costs_a_life() {
        let mut player = Player::default();
        player.vel.y = 4.0;
        let enemy = Enemy::new(1, player.pos + Vec2::new(20.0, 5.0), EnemyKind::Static);

        let contact = player_enemy_collision(&player, &enemy);
        assert!(contact.hit && !contact.from_top);
        assert_eq!(handle_enemy_collision(&mut player, contact), EnemyOutcome::Hurt);
        assert_eq!(player.lives, STARTING_LIVES - 1);
        assert!((player.vel.y - JUMP_FORCE * HURT_BOUNCE).abs() < 1e-4);
    }

    #[test]
    fn test_shield_absorbs_side_hit() {
        let mut player = Player::default();
        player.activate_shield();
        let contact = EnemyContact {
            hit: true,
            from_top: false,
        };
        assert_eq!(handle_enemy_collision(&mut player, contact), EnemyOutcome::Shielded);
        assert!(!player.shield);
        assert_eq!(player.lives, STARTING_LIVES);
    }

    #[test]
    fn test_stomp_keeps_shield() {
        let mut player = Player::default();
        player.activate_shield();
        let contact = EnemyContact {
            hit: true,
            from_top: true,
        };
        assert_eq!(handle_enemy_collision(&mut player, contact), EnemyOutcome::Stomped);
        assert!(player.shield);
    }

    #[test]
    fn test_last_life() {
        let mut player = Player::default();
        player.lives = 1;
        let contact = EnemyContact {
            hit: true,
            from_top: false,
        };
        let outcome = handle_enemy_collision(&mut player, contact);
        assert_eq!(outcome, EnemyOutcome::Killed);
        assert!(!outcome.removes_enemy());
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn test_bullet_hits_enemy() {
        let enemy = Enemy::new(1, Vec2::new(100.0, 300.0), EnemyKind::Static);
        let hit = Bullet::new(2, Vec2::new(110.0, 298.0));
        let miss = Bullet::new(3, Vec2::new(140.0, 298.0));
        assert!(bullet_enemy_collision(&hit, &enemy));
        assert!(!bullet_enemy_collision(&miss, &enemy));
    }
}
