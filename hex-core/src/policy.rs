//! Move sources for drivers

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Cell};
use crate::game::Player;

/// Something that picks a cell to play on a board
///
/// Implementations must return a cell that is currently empty; drivers treat
/// anything else as the policy's fault.
pub trait MovePolicy: Send {
    /// Choose a placement for `player`, or `None` if there is nothing to play
    fn select_move(&mut self, board: &Board, player: Player) -> Option<Cell>;

    fn name(&self) -> &str;
}

/// Uniformly random choice among empty cells
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl MovePolicy for RandomPolicy {
    fn select_move(&mut self, board: &Board, _player: Player) -> Option<Cell> {
        board.empty_cells().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, Move};
    use crate::rules::is_legal;

    #[test]
    fn test_random_policy_selects_legal_cell() {
        let mut policy = RandomPolicy::with_seed(3);
        let mut game = Game::new(4).unwrap();
        game.play(Move::Place(Cell::new(0, 0))).unwrap();
        game.play(Move::Place(Cell::new(2, 1))).unwrap();

        for _ in 0..100 {
            let cell = policy.select_move(game.board(), Player::First).unwrap();
            assert!(is_legal(game.board(), cell.row, cell.col).unwrap());
        }
    }

    #[test]
    fn test_random_policy_full_board() {
        let mut game = Game::new(1).unwrap();
        game.play(Move::Place(Cell::new(0, 0))).unwrap();
        let mut policy = RandomPolicy::new();
        assert_eq!(policy.select_move(game.board(), Player::Second), None);
    }

    #[test]
    fn test_random_policy_is_reproducible() {
        let board = Board::new(7).unwrap();
        let mut a = RandomPolicy::with_seed(11);
        let mut b = RandomPolicy::with_seed(11);
        for _ in 0..20 {
            assert_eq!(
                a.select_move(&board, Player::First),
                b.select_move(&board, Player::First)
            );
        }
    }

    #[test]
    fn test_random_games_end_with_winner() {
        let mut policy = RandomPolicy::with_seed(5);
        for size in 1..=8 {
            let mut game = Game::new(size).unwrap();
            while !game.result().is_decided() {
                let cell = policy
                    .select_move(game.board(), game.to_play())
                    .expect("undecided game must have an empty cell");
                game.play(Move::Place(cell)).unwrap();
            }
            assert!(game.result().winner().is_some());
            assert!(game.history().len() <= size * size);
        }
    }
}
