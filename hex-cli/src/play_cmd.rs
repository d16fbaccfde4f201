//! Play command - one environment episode with a random agent
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play_episode()
//! - Level 3: (delegated to hex-env)
//! - Level 4: flag overrides

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hex_core::{Move, MovePolicy, Player, RandomPolicy};
use hex_env::{EnvConfig, HexEnv, IllegalMoveMode, OpponentKind, Step};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// JSON environment config (flags below override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Board size
    #[arg(long)]
    pub size: Option<usize>,

    /// Agent color: black (moves first) or white
    #[arg(long)]
    pub color: Option<String>,

    /// Opponent policy
    #[arg(long)]
    pub opponent: Option<String>,

    /// Illegal move handling: raise or lose
    #[arg(long)]
    pub illegal_move: Option<String>,

    /// Don't print the board after every step
    #[arg(long)]
    pub quiet: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;

    tracing::info!(
        "Starting episode: size={}, agent={}, opponent={}, illegal_move={}",
        config.board_size,
        config.player_color,
        config.opponent,
        config.illegal_move_mode
    );

    let agent_seed = seed.map(|s| s.wrapping_add(1)).unwrap_or_else(rand::random);
    let mut agent = RandomPolicy::with_seed(agent_seed);
    let mut env = HexEnv::new(config)?;

    let last = play_episode(&mut env, &mut agent, args.quiet)?;
    match last {
        Some(step) => println!("Result: {:?} (reward {})", step.result, step.reward),
        None => println!("Result: {:?}", env.result()),
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge the config file (if any) with command-line overrides
fn build_config(args: &PlayArgs, seed: Option<u64>) -> Result<EnvConfig> {
    let mut config = match &args.config {
        Some(path) => EnvConfig::load(path)?,
        None => EnvConfig::default(),
    };

    if let Some(size) = args.size {
        config.board_size = size;
    }
    if let Some(color) = &args.color {
        config.player_color = color.parse::<Player>().context("Invalid --color")?;
    }
    if let Some(opponent) = &args.opponent {
        config.opponent = opponent.parse::<OpponentKind>().context("Invalid --opponent")?;
    }
    if let Some(mode) = &args.illegal_move {
        config.illegal_move_mode = mode.parse::<IllegalMoveMode>().context("Invalid --illegal-move")?;
    }
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}

/// Step the environment until the episode ends
fn play_episode(env: &mut HexEnv, agent: &mut RandomPolicy, quiet: bool) -> Result<Option<Step>> {
    let color = env.config().player_color;
    let size = env.board().size();
    let mut last = None;

    if !quiet {
        println!("{}", env.render());
    }

    while !env.is_done() {
        let mv = match agent.select_move(env.board(), color) {
            Some(cell) => Move::Place(cell),
            None => Move::Resign,
        };
        let step = env.step(mv.to_action(size))?;
        if !quiet {
            println!("{}", env.render());
        }
        last = Some(step);
    }

    Ok(last)
}
