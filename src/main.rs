//! Wumpus-Agent: watch an alpha-beta agent hunt the wumpus.
//!
//! ## Usage
//!
//! - `wumpus-agent` - Autoplay one game with default settings
//! - `wumpus-agent play` - Autoplay one game, printing the board every tick
//! - `wumpus-agent wtp` - Start the text protocol server for front ends

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use wumpus_agent::config::GameConfig;
use wumpus_agent::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_DEPTH, DEFAULT_MAX_TICKS, DEFAULT_PIT_COUNT,
};
use wumpus_agent::protocol::WtpEngine;
use wumpus_agent::search::SearchMode;
use wumpus_agent::session::Session;

/// Wumpus-Agent: an alpha-beta Hunt the Wumpus player
#[derive(Parser)]
#[command(name = "wumpus-agent")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, env = "WUMPUS_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Autoplay one game in the terminal
    Play(GameArgs),
    /// Start the Wumpus Text Protocol server on stdin/stdout
    Wtp(GameArgs),
}

#[derive(Args, Clone)]
struct GameArgs {
    /// Board side length
    #[arg(long, env = "WUMPUS_SIZE", default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Number of pits
    #[arg(long, env = "WUMPUS_PITS", default_value_t = DEFAULT_PIT_COUNT)]
    pits: usize,

    /// Search depth in plies
    #[arg(long, env = "WUMPUS_DEPTH", default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Seed for entity placement (random if omitted)
    #[arg(long, env = "WUMPUS_SEED")]
    seed: Option<u64>,

    /// Search mode: adversarial or single-agent
    #[arg(long, default_value_t = SearchMode::Adversarial)]
    mode: SearchMode,

    /// Stop autoplay after this many ticks
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: usize,
}

impl Default for GameArgs {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            size: config.board_size,
            pits: config.pit_count,
            depth: config.depth,
            seed: config.seed,
            mode: config.mode,
            max_ticks: config.max_ticks,
        }
    }
}

impl From<GameArgs> for GameConfig {
    fn from(args: GameArgs) -> Self {
        GameConfig {
            board_size: args.size,
            pit_count: args.pits,
            depth: args.depth,
            seed: args.seed,
            mode: args.mode,
            max_ticks: args.max_ticks,
        }
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Some(Commands::Wtp(args)) => {
            let config = GameConfig::from(args);
            config.validate()?;
            info!(?config, "starting WTP server");
            let mut engine = WtpEngine::new(config).context("failed to start a game")?;
            engine.run().context("protocol I/O failed")?;
        }
        Some(Commands::Play(args)) => run_play(args.into())?,
        None => run_play(GameArgs::default().into())?,
    }
    Ok(())
}

fn run_play(config: GameConfig) -> Result<()> {
    config.validate()?;
    println!("Wumpus-Agent: Hunt the Wumpus with alpha-beta search\n");

    let mut session = Session::new(config.clone()).context("failed to start a game")?;
    println!("{}", session.state().render());

    while session.ticks() < config.max_ticks {
        let Some(tick) = session.tick()? else {
            break;
        };
        let state = session.state();
        println!(
            "Tick {}: {} -> {}  score {}  (eval {}, {} nodes)",
            tick.number,
            tick.from,
            tick.to,
            state.score(),
            tick.search.score,
            tick.search.nodes
        );
        println!(
            "Wumpus killed: {} | Gold collected: {}",
            yes_no(state.wumpus_killed()),
            yes_no(state.gold_collected())
        );
        println!("{}", state.render());
    }

    let state = session.state();
    let outcome = match (state.game_over(), state.won()) {
        (true, true) => "You Won!",
        (true, false) => "Game Over!",
        (false, _) => "Tick limit reached.",
    };
    println!("{outcome} Final score: {}", state.score());
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
