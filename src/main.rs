//! Skyguard entry point
//!
//! Runs one headless session with the demo autopilot against the recording
//! canvas. Display backends link the library and supply their own
//! `Canvas`, `InputSource` and `FrameClock`.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use skyguard::platform::{Autopilot, FixedRateClock, FrameClock, NullClock, TickLimit};
use skyguard::render::FrameRecorder;
use skyguard::sim::GameState;
use skyguard::{Tuning, run_session};

#[derive(Parser)]
#[command(version, about = "Skyguard: fixed-tick shooter simulation (headless demo)")]
struct Cli {
    /// RNG seed; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding balance values
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 3000)]
    max_ticks: u64,

    /// Pace ticks with the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print the final game state as JSON
    #[arg(long)]
    dump_state: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                eprintln!("Error loading {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut state = match GameState::try_with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut clock: Box<dyn FrameClock> = if cli.realtime {
        Box::new(FixedRateClock::new(state.tuning.tick_duration()))
    } else {
        Box::new(NullClock::default())
    };

    let mut input = TickLimit::new(Autopilot::default(), cli.max_ticks);
    let mut canvas = FrameRecorder::default();

    let outcome = run_session(&mut state, &mut input, clock.as_mut(), &mut canvas);

    println!(
        "{:?} at tick {} with score {} ({} frames)",
        outcome,
        state.time_ticks,
        state.score.value(),
        canvas.frames_presented()
    );

    if cli.dump_state {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing state: {e}");
                std::process::exit(1);
            }
        }
    }
}
