//! HEX CLI - Command-line interface
//!
//! Commands:
//! - play: Run one environment episode with a random agent
//! - match: Play a series of games between two policies

mod match_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use match_cmd::MatchArgs;
use play_cmd::PlayArgs;

#[derive(Parser)]
#[command(name = "hex")]
#[command(about = "Hex board game engine and environment")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one episode against the configured opponent
    Play(PlayArgs),
    /// Play a match between two policies
    Match(MatchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}
