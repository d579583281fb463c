mod bubble;
mod collision;
mod config;
mod driver;
mod replay;
mod session;
mod simulation;

use std::path::PathBuf;

use bubble_core::{ScreenSize, TuningProfile};

use crate::config::{load_config_from_path, GameConfig, DEFAULT_SEED};
use crate::driver::GameDriver;
use crate::replay::{load_replay_from_path, ReplaySequence};

const SWEEP_DT: f64 = 1.0 / 30.0;
const SWEEP_SECS: f64 = 20.0;
/// Hard stop for a run whose round never ends on its own.
const MAX_RUN_SECS: f64 = 3600.0;

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<PathBuf>,
    replay: Option<PathBuf>,
    profile: Option<TuningProfile>,
    seed: Option<u64>,
}

fn usage() -> String {
    "Usage: cargo run -p bubble_game -- [--config <path>] [--replay <path>] [--profile classic|tuned] [--seed N]\nExample: cargo run -p bubble_game -- --profile classic --seed 7".to_string()
}

fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("Missing value for '{flag}'"))
        };
        match flag.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--replay" => parsed.replay = Some(PathBuf::from(value()?)),
            "--profile" => {
                let raw = value()?;
                let profile = TuningProfile::from_label(&raw)
                    .ok_or_else(|| format!("Unknown profile '{raw}'"))?;
                parsed.profile = Some(profile);
            }
            "--seed" => {
                let raw = value()?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|e| format!("Invalid seed '{raw}': {e}"))?;
                parsed.seed = Some(seed);
            }
            other => return Err(format!("Unknown argument '{other}'")),
        }
    }
    Ok(parsed)
}

/// Config file or profile preset, then the seed flag on top.
fn resolve_config(args: &CliArgs) -> Result<GameConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let config = load_config_from_path(path)?;
            if args.profile.is_some_and(|p| p != config.profile) {
                log::warn!(
                    "Ignoring --profile: {} sets profile '{}'",
                    path.display(),
                    config.profile
                );
            }
            config
        }
        None => GameConfig::for_profile(args.profile.unwrap_or_default(), DEFAULT_SEED),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn resolve_replay(args: &CliArgs) -> Result<ReplaySequence, String> {
    match &args.replay {
        Some(path) => load_replay_from_path(path),
        None => Ok(ReplaySequence::pointer_sweep(
            ScreenSize::new(1280.0, 720.0),
            SWEEP_DT,
            SWEEP_SECS,
        )),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{}", usage());
            std::process::exit(2);
        }
    };

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let replay = match resolve_replay(&args) {
        Ok(replay) => replay,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Bubble pop starting: profile={} seed={} inputs={} dt={:.4}",
        config.profile,
        config.seed,
        replay.frames.len(),
        replay.fixed_dt
    );

    let mut driver = GameDriver::new(&config);
    let summary = driver.run_replay(&replay, 0.0, MAX_RUN_SECS);

    log::info!(
        "Run finished after {} steps ({:.1}s): score={} high_score={} level={}",
        summary.steps,
        summary.steps as f64 * replay.fixed_dt,
        summary.score,
        summary.high_score,
        summary.level
    );
    log::info!(
        "Bubbles: spawned={} popped={} escaped={} skipped_at_cap={}",
        summary.stats.spawned,
        summary.stats.popped,
        summary.stats.escaped,
        summary.stats.skipped_at_cap
    );
    log::info!(
        "Final state: {} bubbles on screen, tracker {}, round {}",
        driver.simulation().bubbles().len(),
        driver.tracker().status_text(),
        if summary.finished { "complete" } else { "cut short" }
    );
}
