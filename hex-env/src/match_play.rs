//! Match play - complete games between two policies
//!
//! Colors alternate each game: contestant A moves first in even-numbered
//! games, contestant B in odd-numbered ones.

use hex_core::{Game, GameResult, Move, MovePolicy, Player, Result};
use rayon::prelude::*;
use serde::Serialize;

/// Builds a fresh policy from a seed
pub type PolicyFactory = dyn Fn(u64) -> Box<dyn MovePolicy> + Sync;

/// Match settings
#[derive(Clone, Debug)]
pub struct MatchConfig {
    pub board_size: usize,
    /// Number of games (should be even for color alternation)
    pub games: usize,
    /// Base seed; game `i` derives its seeds from `seed + i`
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: 11,
            games: 10,
            seed: 42,
        }
    }
}

/// Which contestant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Side {
    A,
    B,
}

/// One finished game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub game_number: usize,
    pub result: GameResult,
    /// Contestant that played First
    pub first_policy: Side,
    pub moves: Vec<Move>,
}

impl GameRecord {
    /// Winning contestant
    pub fn winner(&self) -> Option<Side> {
        let winner = self.result.winner()?;
        let other = match self.first_policy {
            Side::A => Side::B,
            Side::B => Side::A,
        };
        Some(if winner == Player::First { self.first_policy } else { other })
    }
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub a_wins: usize,
    pub b_wins: usize,
    /// Games won by whoever moved first
    pub first_player_wins: usize,
    pub games_played: usize,
    /// Average number of moves per game
    pub avg_moves: f32,
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    pub fn a_win_rate(&self) -> f32 {
        rate(self.a_wins, self.games_played)
    }

    pub fn b_win_rate(&self) -> f32 {
        rate(self.b_wins, self.games_played)
    }

    pub fn first_player_win_rate(&self) -> f32 {
        rate(self.first_player_wins, self.games_played)
    }
}

fn rate(count: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        count as f32 / total as f32
    }
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Play a match sequentially
pub fn play_match(a: &PolicyFactory, b: &PolicyFactory, config: &MatchConfig) -> Result<MatchResult> {
    let records = (0..config.games)
        .map(|i| play_single_game(a, b, config, i))
        .collect::<Result<Vec<_>>>()?;
    Ok(aggregate_results(records))
}

/// Play a match with games spread over the rayon pool
pub fn play_match_parallel(
    a: &PolicyFactory,
    b: &PolicyFactory,
    config: &MatchConfig,
) -> Result<MatchResult> {
    let records = (0..config.games)
        .into_par_iter()
        .map(|i| play_single_game(a, b, config, i))
        .collect::<Result<Vec<_>>>()?;
    Ok(aggregate_results(records))
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Play one game to completion
///
/// A policy with nothing to play resigns; an illegal choice is an error.
fn play_single_game(
    a: &PolicyFactory,
    b: &PolicyFactory,
    config: &MatchConfig,
    game_index: usize,
) -> Result<GameRecord> {
    let seed = config.seed.wrapping_add(game_index as u64);
    let a_first = game_index % 2 == 0;
    let (mut first, mut second) = if a_first {
        (a(seed), b(seed.wrapping_add(1 << 32)))
    } else {
        (b(seed.wrapping_add(1 << 32)), a(seed))
    };

    let mut game = Game::new(config.board_size)?;
    while !game.result().is_decided() {
        let player = game.to_play();
        let policy = match player {
            Player::First => &mut first,
            Player::Second => &mut second,
        };
        let mv = match policy.select_move(game.board(), player) {
            Some(cell) => Move::Place(cell),
            None => Move::Resign,
        };
        game.play(mv)?;
    }

    tracing::debug!(
        "Game {}: {:?} after {} moves",
        game_index + 1,
        game.result(),
        game.history().len()
    );

    Ok(GameRecord {
        game_number: game_index + 1,
        result: game.result(),
        first_policy: if a_first { Side::A } else { Side::B },
        moves: game.history().to_vec(),
    })
}

/// Compute aggregate statistics
fn aggregate_results(games: Vec<GameRecord>) -> MatchResult {
    let a_wins = games.iter().filter(|g| g.winner() == Some(Side::A)).count();
    let b_wins = games.iter().filter(|g| g.winner() == Some(Side::B)).count();
    let first_player_wins = games
        .iter()
        .filter(|g| g.result == GameResult::FirstWins)
        .count();
    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResult {
        a_wins,
        b_wins,
        first_player_wins,
        games_played: games.len(),
        avg_moves,
        games,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hex_core::RandomPolicy;

    fn random(seed: u64) -> Box<dyn MovePolicy> {
        Box::new(RandomPolicy::with_seed(seed))
    }

    #[test]
    fn test_empty_match() {
        let config = MatchConfig {
            games: 0,
            ..Default::default()
        };
        let result = play_match(&random, &random, &config).unwrap();
        assert_eq!(result.games_played, 0);
        assert_eq!(result.a_win_rate(), 0.0);
    }

    #[test]
    fn test_match_alternates_and_decides() {
        let config = MatchConfig {
            board_size: 5,
            games: 6,
            seed: 3,
        };
        let result = play_match(&random, &random, &config).unwrap();
        assert_eq!(result.games_played, 6);
        assert_eq!(result.a_wins + result.b_wins, 6);
        assert_eq!(result.games[0].first_policy, Side::A);
        assert_eq!(result.games[1].first_policy, Side::B);
        assert!(result.games.iter().all(|g| g.result.is_decided()));
        assert!(result.avg_moves >= 5.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = MatchConfig {
            board_size: 4,
            games: 8,
            seed: 21,
        };
        let seq = play_match(&random, &random, &config).unwrap();
        let par = play_match_parallel(&random, &random, &config).unwrap();
        assert_eq!(seq.a_wins, par.a_wins);
        assert_eq!(seq.first_player_wins, par.first_player_wins);
        for (s, p) in seq.games.iter().zip(&par.games) {
            assert_eq!(s.moves, p.moves);
        }
    }

    #[test]
    fn test_record_winner_mapping() {
        let record = GameRecord {
            game_number: 1,
            result: GameResult::SecondWins,
            first_policy: Side::B,
            moves: vec![],
        };
        assert_eq!(record.winner(), Some(Side::A));
    }
}
