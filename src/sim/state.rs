//! Game state and session lifecycle
//!
//! `GameState` is the single owner of everything that changes during a run.
//! Renderers read it between ticks and never mutate it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Bullet, Enemy};
use super::generator::{self, GeneratorState};
use super::platform::Platform;
use super::player::Player;
use crate::consts::*;
use crate::tuning::Tuning;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Dropped below the bottom of the view
    FellDown,
    /// Last life lost to an enemy
    LivesExhausted,
}

impl GameOverReason {
    pub fn message(self) -> &'static str {
        match self {
            GameOverReason::FellDown => "fell down",
            GameOverReason::LivesExhausted => "lives exhausted",
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Terminal until `reset_game`
    GameOver(GameOverReason),
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Source of every random decision in the run
    #[serde(skip, default = "unseeded_rng")]
    pub rng: Pcg32,
    pub player: Player,
    /// Active platforms (sorted by id)
    pub platforms: Vec<Platform>,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Active bullets (sorted by id)
    pub bullets: Vec<Bullet>,
    /// Never decreases within a run
    pub score: u64,
    /// Score earned from climbing
    pub height_points: u64,
    /// Score earned from first bounces on platforms
    pub bounce_points: u64,
    /// Highest feet position reached this run
    pub max_height: f32,
    /// World Y of the bottom of the view; only ever rises
    pub camera_offset: f32,
    pub phase: GamePhase,
    /// Host clock, summed from tick elapsed times (ms)
    pub clock_ms: f64,
    pub last_shot_ms: Option<f64>,
    /// Bullets fired this run
    pub shots_fired: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub generator: GeneratorState,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new run with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::default(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            height_points: 0,
            bounce_points: 0,
            max_height: PLAYER_SPAWN_Y,
            camera_offset: 0.0,
            phase: GamePhase::Playing,
            clock_ms: 0.0,
            last_shot_ms: None,
            shots_fired: 0,
            time_ticks: 0,
            generator: GeneratorState::default(),
            next_id: 1,
        };
        generator::generate_initial_platforms(&mut state);
        log::info!("Session started with seed {}", seed);
        state
    }

    /// Restart the run with the same seed. The only way out of game over.
    pub fn reset_game(&mut self) {
        self.reset_game_with_seed(self.seed);
    }

    /// Restart with a fresh seed
    pub fn reset_game_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.player.reset();
        self.platforms.clear();
        self.enemies.clear();
        self.bullets.clear();
        self.score = 0;
        self.height_points = 0;
        self.bounce_points = 0;
        self.max_height = PLAYER_SPAWN_Y;
        self.camera_offset = 0.0;
        self.phase = GamePhase::Playing;
        self.clock_ms = 0.0;
        self.last_shot_ms = None;
        self.shots_fired = 0;
        self.time_ticks = 0;
        self.generator = GeneratorState::default();
        self.next_id = 1;
        generator::generate_initial_platforms(self);
        log::info!("Session reset with seed {}", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self.phase {
            GamePhase::GameOver(reason) => Some(reason),
            GamePhase::Playing => None,
        }
    }

    /// End the run. The first reason sticks.
    pub fn end(&mut self, reason: GameOverReason) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver(reason);
        log::info!(
            "Game over ({}) at score {}, height {:.0}",
            reason.message(),
            self.score,
            self.max_height
        );
    }

    /// Height of a world Y above the bottom of the view
    #[inline]
    pub fn screen_y(&self, world_y: f32) -> f32 {
        world_y - self.camera_offset
    }

    /// Lives left
    pub fn lives(&self) -> u8 {
        self.player.lives
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.platforms.sort_by_key(|p| p.id);
        self.enemies.sort_by_key(|e| e.id);
        self.bullets.sort_by_key(|b| b.id);
    }
}
