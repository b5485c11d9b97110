//! Brickbreak headless runner
//!
//! Plays one game with the autopilot paddle and prints the final frame as
//! JSON. Stands in for a real host: it owns the clock and input, the library
//! owns the rules.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use brickbreak::sim::{Game, GameEvent, autopilot};
use brickbreak::{GameStatus, Tuning};
use clap::Parser;

/// Run a brick breaker game headlessly with a scripted paddle
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON tuning file (defaults are used for missing fields)
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// RNG seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many ticks if the game has not ended
    #[arg(short, long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut game = Game::new(tuning, seed);
    let mut ticks = 0;
    while ticks < args.max_ticks {
        game.set_input_state(autopilot(game.state()));
        let running = game.tick();
        ticks += 1;

        for event in &game.state().events {
            match event {
                GameEvent::LifeLost => log::info!("Life lost at tick {ticks}"),
                GameEvent::LevelUp { level } => log::info!("Reached level {level} at tick {ticks}"),
                _ => {}
            }
        }

        if !running {
            break;
        }
    }

    match game.status() {
        GameStatus::Playing => log::warn!("Stopped after {ticks} ticks without a result"),
        status => log::info!("Finished after {ticks} ticks: {status:?}"),
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize snapshot: {e}");
            ExitCode::FAILURE
        }
    }
}
