mod config;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use env_logger::Env;
use log::info;
use twenty48_engine::{Board, RngSource};

use config::Config;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Replay a scripted move list through the twenty48 engine"
)]
struct Cli {
    /// Optional TOML file with seed, moves and [replay] settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for tile spawns (overrides the config file)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Moves to replay, e.g. "l,l,u,r" (replaces the config file's list)
    #[arg(long, value_name = "DIRS")]
    moves: Option<String>,

    /// Stop after this many scripted moves
    #[arg(long, value_name = "N")]
    max_moves: Option<u64>,

    /// Default log filter when RUST_LOG is unset, e.g. "info", "debug"
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log.as_str())).init();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            Config::from_toml(path)
                .map_err(|e| anyhow!("failed to load config {}: {e}", path.display()))?
        }
        None => Config::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(moves) = cli.moves {
        config.moves = vec![moves];
    }
    if cli.max_moves.is_some() {
        config.replay.max_moves = cli.max_moves;
    }

    let script = config.directions().context("parsing scripted moves")?;
    if script.is_empty() {
        bail!("no moves to replay; pass --moves or set `moves` in the config");
    }

    let mut rng = RngSource::seeded(config.seed);
    let mut board = Board::new();
    board.initialize(&mut rng).context("seeding the board")?;
    info!("seed={} script_len={}", config.seed, script.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = session::replay(&mut board, &script, &config.replay, &mut rng, &mut out)?;
    info!("Completed replay: {summary}");
    Ok(())
}
