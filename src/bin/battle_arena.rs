//! Battle Arena - headless match driver
//!
//! Run with: `cargo run --bin battle_arena -- --frames 3600 --seed 7`
//!
//! Spawns two bots on the stock arena (or a JSON config) and steps the
//! simulation at a fixed 60 Hz, logging kills and a final scoreboard.
//! Set `RUST_LOG=debug` or pass `--verbose` for placement and reload logs.

use std::path::PathBuf;

use build_arena_engine::game::{ArenaConfig, ArenaSimulation, ConfigError};
use build_arena_engine::logging;
use clap::Parser;

/// Fixed simulation step
const STEP: f32 = 1.0 / 60.0;

/// Headless bot-vs-bot build arena
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of 60 Hz frames to simulate
    #[arg(short, long, default_value_t = 3600)]
    frames: u64,

    /// Seed for spread, recoil and bot decisions
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// JSON arena config; missing fields use the stock values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };

    let mut sim = ArenaSimulation::empty(config, args.seed);
    sim.add_player(true);
    sim.add_player(true);

    let mut shots = 0usize;
    let mut kills = 0usize;
    let mut placed = 0usize;
    let mut destroyed = 0usize;
    for _ in 0..args.frames {
        let report = sim.step(STEP, &[]);
        shots += report.shots_fired;
        kills += report.kills.len();
        placed += report.placed.len();
        destroyed += report.destroyed.len();
    }

    log::info!(
        "{} frames ({:.1}s): {} rays, {} kills, {} placed, {} destroyed, {} structures standing",
        sim.frame(),
        sim.time(),
        shots,
        kills,
        placed,
        destroyed,
        sim.world.structures.len()
    );
    for player in &sim.world.players {
        let state = sim
            .bot_state(player.id)
            .map_or_else(|| "human".to_string(), |s| format!("{:?}", s));
        log::info!(
            "{}: {} kills, {} deaths, health {:.0}, shield {:.0}, ammo [{}], state {}",
            player.id,
            player.kills,
            player.deaths,
            player.health,
            player.shield,
            player.ammo_strings().join(", "),
            state
        );
    }
    Ok(())
}
