//! Main entry point for the command line runner.
//!
//! Parses the command line, builds the game configuration, and plays a batch of
//! games with the requested line-up, printing the win tally at the end.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{error, info};

use grid_wars::config::GameConfig;
use grid_wars::config::game::NUM_GAMES;
use grid_wars::game::PlayerKind;
use grid_wars::game::systems::{GameObserver, JsonLinesObserver, NullObserver, TerminalRenderer};
use grid_wars::tournament::run_tournament;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RenderMode {
    /// No output besides the final tally
    None,
    /// Print the board every turn
    Terminal,
    /// One JSON object per snapshot and event on stdout
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "grid-wars", version)]
#[command(about = "Play batches of bot games on a grid of collectible objects")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = NUM_GAMES)]
    games: usize,

    /// Players, comma-separated (random, fixed:<up|down|left|right>)
    #[arg(long, default_value = "random,random")]
    players: String,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the board
    #[arg(long)]
    map_size: Option<usize>,

    /// Turn limit
    #[arg(long)]
    max_turns: Option<u32>,

    /// Fraction of the board bounding the object count
    #[arg(long)]
    density: Option<f64>,

    /// Base seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Measure the time spent in each player's policy
    #[arg(long)]
    timing: bool,

    #[arg(long, value_enum, default_value_t = RenderMode::None)]
    render: RenderMode,
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(map_size) = args.map_size {
        config.map_size = map_size;
    }
    if let Some(max_turns) = args.max_turns {
        config.max_turns = max_turns;
    }
    if let Some(density) = args.density {
        config.object_density = density;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn parse_players(raw: &str) -> Result<Vec<PlayerKind>> {
    let players = raw
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<PlayerKind>().map_err(anyhow::Error::msg))
        .collect::<Result<Vec<_>>>()
        .context("invalid --players")?;
    if players.is_empty() {
        bail!("at least one player is required");
    }
    Ok(players)
}

fn run(args: Args) -> Result<()> {
    let config = build_config(&args)?;
    let players = parse_players(&args.players)?;
    info!("Starting {} games with {:?}", args.games, config);

    let mut observer: Box<dyn GameObserver> = match args.render {
        RenderMode::None => Box::new(NullObserver),
        RenderMode::Terminal => Box::new(TerminalRenderer::new()),
        RenderMode::Json => Box::new(JsonLinesObserver::new(std::io::stdout())),
    };

    let summary = run_tournament(&config, &players, args.games, args.timing, observer.as_mut())?;
    print!("{summary}");
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(args).inspect_err(|e| error!("run aborted: {e:#}"))
}
