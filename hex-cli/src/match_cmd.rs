//! Match command - play games between two policies
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play(), report_results()
//! - Level 3: (delegated to hex-env match play)
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;

use hex_core::MovePolicy;
use hex_env::{play_match, play_match_parallel, MatchConfig, MatchResult, OpponentKind};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Policy for contestant A
    #[arg(long, default_value = "random")]
    pub a: String,

    /// Policy for contestant B
    #[arg(long, default_value = "random")]
    pub b: String,

    /// Board size
    #[arg(long, default_value = "11")]
    pub size: usize,

    /// Number of games to play (will alternate who moves first)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Run games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let a = args.a.parse::<OpponentKind>().context("Invalid policy for contestant A")?;
    let b = args.b.parse::<OpponentKind>().context("Invalid policy for contestant B")?;
    let config = build_config(&args, seed)?;

    tracing::info!(
        "Starting match: {} vs {} ({} games, size={})",
        a,
        b,
        config.games,
        config.board_size
    );

    let factory_a = move |seed: u64| -> Box<dyn MovePolicy> { a.build(seed) };
    let factory_b = move |seed: u64| -> Box<dyn MovePolicy> { b.build(seed) };

    let results = if args.parallel {
        play_match_parallel(&factory_a, &factory_b, &config)?
    } else {
        play_match(&factory_a, &factory_b, &config)?
    };

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &MatchArgs, seed: Option<u64>) -> Result<MatchConfig> {
    if args.size == 0 {
        anyhow::bail!("Board size must be at least 1");
    }
    Ok(MatchConfig {
        board_size: args.size,
        games: args.games,
        seed: seed.unwrap_or(42),
    })
}

fn report_results(results: &MatchResult, args: &MatchArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results, args);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_results(results: &MatchResult, args: &MatchArgs) {
    println!("\n=== Match Results ===");
    println!("Total games:       {}", results.games_played);
    println!(
        "A ({}) wins:  {} ({:.1}%)",
        args.a,
        results.a_wins,
        results.a_win_rate() * 100.0
    );
    println!(
        "B ({}) wins:  {} ({:.1}%)",
        args.b,
        results.b_wins,
        results.b_win_rate() * 100.0
    );
    println!(
        "First mover wins:  {} ({:.1}%)",
        results.first_player_wins,
        results.first_player_win_rate() * 100.0
    );
    println!("Average moves:     {:.1}", results.avg_moves);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(size: usize) -> MatchArgs {
        MatchArgs {
            a: "random".to_string(),
            b: "random".to_string(),
            size,
            games: 2,
            parallel: false,
            json: false,
        }
    }

    #[test]
    fn test_build_config_seed_default() {
        let config = build_config(&args(5), None).unwrap();
        assert_eq!(config.board_size, 5);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_build_config_zero_size() {
        assert!(build_config(&args(0), Some(1)).is_err());
    }

    #[test]
    fn test_run_small_match() {
        assert!(run(args(3), Some(7)).is_ok());
    }
}
