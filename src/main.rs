//! Skyhop headless runner
//!
//! Plays the simulation on autopilot with a simulated host clock and prints a
//! JSON summary per run. Useful for balancing tuning files and soak testing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use skyhop::consts::SIM_DT_MS;
use skyhop::sim::{GameState, TickInput, tick};
use skyhop::view::{Hud, Scene, SpriteCache};
use skyhop::{FixedStepper, Tuning};

#[derive(Parser)]
#[command(author, version, about = "Run the simulation headless on autopilot", long_about = None)]
struct Cli {
    /// Seed of the first run; later runs use seed + n
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Frame budget per run (host frames, not ticks)
    #[arg(long, default_value_t = 36_000)]
    frames: u64,
    /// Simulated host frame time in ms
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,
    /// Number of runs
    #[arg(long, default_value_t = 1)]
    runs: u32,
    /// JSON tuning file, defaults are used when omitted
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the default tuning as JSON and exit
    #[arg(long)]
    print_tuning: bool,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    max_height: f32,
    shots_fired: u64,
    platforms_live: usize,
    draw_items: usize,
    hud: Hud,
}

fn play(state: &mut GameState, cli: &Cli, sprites: &mut SpriteCache) -> RunSummary {
    let mut stepper = FixedStepper::new();
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    for _ in 0..cli.frames {
        let substeps = stepper.advance(cli.frame_ms);
        for _ in 0..substeps {
            tick(state, &input, SIM_DT_MS);
        }
        if state.is_game_over() {
            break;
        }
    }

    let scene = Scene::build(state, sprites);
    RunSummary {
        seed: state.seed,
        ticks: state.time_ticks,
        max_height: state.max_height,
        shots_fired: state.shots_fired,
        platforms_live: state.platforms.len(),
        draw_items: scene.items.len(),
        hud: scene.hud,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.print_tuning {
        let json = serde_json::to_string_pretty(&Tuning::default()).context("serialize tuning")?;
        println!("{json}");
        return Ok(());
    }

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("load tuning {}", path.display()))?,
        None => Tuning::default(),
    };

    log::info!("Skyhop (headless) starting: {} run(s) from seed {}", cli.runs, cli.seed);

    let mut sprites = SpriteCache::headless();
    let mut state = GameState::with_tuning(cli.seed, tuning);
    let mut summaries = Vec::with_capacity(cli.runs as usize);
    for run in 0..cli.runs {
        if run > 0 {
            state.reset_game_with_seed(cli.seed.wrapping_add(run as u64));
        }
        summaries.push(play(&mut state, &cli, &mut sprites));
    }

    let json = serde_json::to_string_pretty(&summaries).context("serialize summary")?;
    println!("{json}");
    Ok(())
}
