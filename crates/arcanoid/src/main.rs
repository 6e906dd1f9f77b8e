//! Headless arcanoid runner

use std::path::PathBuf;

use anyhow::{Context, Result};
use arc_engine::config::Config;
use arc_engine::foundation::logging;
use clap::{value_parser, Arg, Command};

use arcanoid::runner::{run_headless, Autopilot, RunOptions};
use arcanoid::{load_game, save_game, GameConfig, GameSession, HighScores, LogRenderer};

fn main() -> Result<()> {
    let matches = Command::new("arcanoid")
        .about("Runs the brick-breaker simulation headless with an autopilot")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Configuration file (.toml or .ron)"),
        )
        .arg(
            Arg::new("ticks")
                .short('n')
                .long("ticks")
                .value_name("COUNT")
                .value_parser(value_parser!(u64))
                .default_value("3600")
                .help("Maximum number of ticks to simulate"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .value_parser(value_parser!(u64))
                .help("Seed for the brick layout"),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Write a save file when the run ends"),
        )
        .arg(
            Arg::new("load")
                .long("load")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Restore a save file before running"),
        )
        .arg(
            Arg::new("scores")
                .long("scores")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("High-score table (defaults to the configured path)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .default_value("info")
                .help("Log level used when RUST_LOG is not set"),
        )
        .arg(
            Arg::new("real-time")
                .long("real-time")
                .action(clap::ArgAction::SetTrue)
                .help("Pace ticks to the configured frame rate"),
        )
        .get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map_or("info", String::as_str);
    logging::init_with_level(level);

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GameConfig::load_from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => GameConfig::default(),
    };

    let scores_path = matches
        .get_one::<PathBuf>("scores")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(&config.files.high_scores));
    let mut high_scores = HighScores::load(&scores_path)
        .with_context(|| format!("reading high scores from {}", scores_path.display()))?;
    if let Some(best) = high_scores.best() {
        log::info!("Best score so far: {best}");
    }

    let mut session = match matches.get_one::<u64>("seed") {
        Some(seed) => GameSession::with_seed(config, *seed),
        None => GameSession::new(config),
    };

    if let Some(path) = matches.get_one::<PathBuf>("load") {
        load_game(&mut session, path)
            .with_context(|| format!("loading save file {}", path.display()))?;
    }

    let options = RunOptions {
        max_ticks: matches.get_one::<u64>("ticks").copied().unwrap_or(3600),
        real_time: matches.get_flag("real-time"),
    };
    let mut autopilot = Autopilot::new(4.0);
    let mut renderer = LogRenderer::new(u64::from(session.config().window.target_fps));
    let summary = run_headless(
        &mut session,
        &mut autopilot,
        &mut renderer,
        &options,
        |session, autopilot| autopilot.observe(session),
    );

    println!(
        "{:?} after {} ticks: score {}, lives {}, bricks left {}",
        summary.phase, summary.ticks, summary.score, summary.lives, summary.bricks_left
    );

    if let Some(path) = matches.get_one::<PathBuf>("save") {
        save_game(&session, path)
            .with_context(|| format!("writing save file {}", path.display()))?;
    }

    if high_scores.submit(summary.score) {
        println!("New high score!");
    }
    high_scores
        .save(&scores_path)
        .with_context(|| format!("writing high scores to {}", scores_path.display()))?;

    Ok(())
}
