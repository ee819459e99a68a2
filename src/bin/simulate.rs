use std::path::PathBuf;

use clap::Parser;
use maze_chase_server::engine::Engine;
use maze_chase_server::types::{Direction, EngineConfig, EventKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Headless soak run: a seeded random walker plays the maze for a fixed
/// number of ticks and the run is summarized as one JSON line.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Roughly how many ticks between random direction changes.
    #[arg(long, default_value_t = 30)]
    input_period: u64,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
struct SummaryLine {
    seed: u64,
    ticks: u64,
    score: i32,
    lives: i32,
    won: bool,
    #[serde(rename = "gameOver")]
    game_over: bool,
    #[serde(rename = "collectiblesRemaining")]
    collectibles_remaining: i32,
    #[serde(rename = "ghostsEaten")]
    ghosts_eaten: u64,
    deaths: u64,
}

fn main() {
    let cli = Cli::parse();
    let mut engine = Engine::new(EngineConfig::default()).expect("default layout is valid");
    let mut rng = StdRng::seed_from_u64(cli.seed);

    let mut ghosts_eaten = 0u64;
    let mut deaths = 0u64;

    for tick in 0..cli.ticks {
        if engine.is_over() {
            break;
        }
        if tick % cli.input_period == 0 {
            engine.queue_direction(random_direction(&mut rng));
        }
        engine.step();
        for event in engine.build_snapshot(true).events {
            match event.kind {
                EventKind::GhostEaten => ghosts_eaten += 1,
                EventKind::Died => {
                    deaths += 1;
                    // unpause after a life is lost so the walk continues
                    if !engine.is_over() {
                        engine.queue_direction(random_direction(&mut rng));
                    }
                }
                _ => {}
            }
        }
    }

    let session = engine.session();
    let summary = SummaryLine {
        seed: cli.seed,
        ticks: cli.ticks,
        score: session.score,
        lives: session.lives,
        won: session.won,
        game_over: session.game_over,
        collectibles_remaining: session.collectibles_remaining,
        ghosts_eaten,
        deaths,
    };

    let line = serde_json::to_string(&summary).expect("summary serializes");
    println!("{line}");

    if let Some(path) = cli.summary_out {
        let pretty = serde_json::to_string_pretty(&summary).expect("summary serializes");
        if let Err(err) = std::fs::write(&path, pretty) {
            eprintln!("[simulate] failed to write {}: {err}", path.display());
            std::process::exit(1);
        }
        println!("[simulate] summary written to {}", path.display());
    }
}

fn random_direction(rng: &mut StdRng) -> Direction {
    match rng.random_range(0..4) {
        0 => Direction::Up,
        1 => Direction::Down,
        2 => Direction::Left,
        _ => Direction::Right,
    }
}
