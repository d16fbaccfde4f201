//! Win detection by flood fill over hex adjacency
//!
//! First connects row 0 to row `size - 1`; Second connects column 0 to
//! column `size - 1`. Each scan is written out separately because the far
//! edge can only be reached through the neighbors that advance toward it
//! (Down/DownLeft for First, Right/UpRight for Second).

use rustc_hash::FxHashSet;

use crate::board::{Board, Occupant};
use crate::game::{GameResult, Player};

/// Decide the outcome of a position
pub fn evaluate(board: &Board) -> GameResult {
    if first_connects(board) {
        GameResult::FirstWins
    } else if second_connects(board) {
        GameResult::SecondWins
    } else {
        GameResult::Undecided
    }
}

/// Check whether `player` has a chain joining their two edges
pub fn has_connection(board: &Board, player: Player) -> bool {
    match player {
        Player::First => first_connects(board),
        Player::Second => second_connects(board),
    }
}

/// Top-to-bottom scan for First
fn first_connects(board: &Board) -> bool {
    let size = board.size();
    let last = size - 1;
    let owned = |row: usize, col: usize| board.at(row, col) == Occupant::OwnedByFirst;

    // Seed with First's stones on row 0 (index == col)
    let mut frontier: Vec<usize> = (0..size).filter(|&col| owned(0, col)).collect();
    if last == 0 {
        return !frontier.is_empty();
    }

    let mut visited: FxHashSet<usize> = FxHashSet::default();
    while let Some(index) = frontier.pop() {
        if !visited.insert(index) {
            continue;
        }
        let (row, col) = (index / size, index % size);
        let mut push = |r: usize, c: usize| {
            let i = r * size + c;
            if !visited.contains(&i) {
                frontier.push(i);
            }
        };

        // Left
        if col > 0 && owned(row, col - 1) {
            push(row, col - 1);
        }
        // Right
        if col + 1 < size && owned(row, col + 1) {
            push(row, col + 1);
        }
        // Up
        if row > 0 && owned(row - 1, col) {
            push(row - 1, col);
        }
        // Down
        if row + 1 < size && owned(row + 1, col) {
            if row + 1 == last {
                return true;
            }
            push(row + 1, col);
        }
        // UpRight
        if row > 0 && col + 1 < size && owned(row - 1, col + 1) {
            push(row - 1, col + 1);
        }
        // DownLeft
        if row + 1 < size && col > 0 && owned(row + 1, col - 1) {
            if row + 1 == last {
                return true;
            }
            push(row + 1, col - 1);
        }
    }
    false
}

/// Left-to-right scan for Second
fn second_connects(board: &Board) -> bool {
    let size = board.size();
    let last = size - 1;
    let owned = |row: usize, col: usize| board.at(row, col) == Occupant::OwnedBySecond;

    // Seed with Second's stones on column 0
    let mut frontier: Vec<usize> = (0..size)
        .filter(|&row| owned(row, 0))
        .map(|row| row * size)
        .collect();
    if last == 0 {
        return !frontier.is_empty();
    }

    let mut visited: FxHashSet<usize> = FxHashSet::default();
    while let Some(index) = frontier.pop() {
        if !visited.insert(index) {
            continue;
        }
        let (row, col) = (index / size, index % size);
        let mut push = |r: usize, c: usize| {
            let i = r * size + c;
            if !visited.contains(&i) {
                frontier.push(i);
            }
        };

        // Left
        if col > 0 && owned(row, col - 1) {
            push(row, col - 1);
        }
        // Right
        if col + 1 < size && owned(row, col + 1) {
            if col + 1 == last {
                return true;
            }
            push(row, col + 1);
        }
        // Up
        if row > 0 && owned(row - 1, col) {
            push(row - 1, col);
        }
        // Down
        if row + 1 < size && owned(row + 1, col) {
            push(row + 1, col);
        }
        // UpRight
        if row > 0 && col + 1 < size && owned(row - 1, col + 1) {
            if col + 1 == last {
                return true;
            }
            push(row - 1, col + 1);
        }
        // DownLeft
        if row + 1 < size && col > 0 && owned(row + 1, col - 1) {
            push(row + 1, col - 1);
        }
    }
    false
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::rules::apply;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn board_with(size: usize, first: &[(usize, usize)], second: &[(usize, usize)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(r, c) in first {
            apply(&mut board, r, c, Player::First).unwrap();
        }
        for &(r, c) in second {
            apply(&mut board, r, c, Player::Second).unwrap();
        }
        board
    }

    /// Fill every cell at random, roughly half for each player
    fn random_full_board(size: usize, rng: &mut ChaCha8Rng) -> Board {
        let mut board = Board::new(size).unwrap();
        let mut cells = board.empty_cells();
        cells.shuffle(rng);
        for (i, cell) in cells.into_iter().enumerate() {
            let player = if i % 2 == 0 { Player::First } else { Player::Second };
            board.set(cell, player.occupant());
        }
        board
    }

    #[test]
    fn test_empty_board_undecided() {
        for size in 1..=11 {
            let board = Board::new(size).unwrap();
            assert_eq!(evaluate(&board), GameResult::Undecided, "size {}", size);
        }
    }

    #[test]
    fn test_single_cell_board() {
        let board = board_with(1, &[(0, 0)], &[]);
        assert_eq!(evaluate(&board), GameResult::FirstWins);

        let board = board_with(1, &[], &[(0, 0)]);
        assert_eq!(evaluate(&board), GameResult::SecondWins);
    }

    #[test]
    fn test_two_by_two_full_board() {
        let board = board_with(2, &[(0, 0), (1, 0)], &[(0, 1), (1, 1)]);
        assert_eq!(evaluate(&board), GameResult::FirstWins);
    }

    #[test]
    fn test_straight_column() {
        let board = board_with(3, &[(0, 0), (1, 0), (2, 0)], &[]);
        assert_eq!(evaluate(&board), GameResult::FirstWins);
    }

    #[test]
    fn test_down_left_diagonal() {
        // (0,1) -> (1,0) is only reachable through the DownLeft neighbor
        let board = board_with(3, &[(0, 1), (1, 0), (2, 0)], &[]);
        assert_eq!(evaluate(&board), GameResult::FirstWins);
    }

    #[test]
    fn test_down_right_is_not_adjacent() {
        // (0,0) -> (1,1) -> (2,2) is a plain diagonal, not a hex chain
        let board = board_with(3, &[(0, 0), (1, 1), (2, 2)], &[]);
        assert_eq!(evaluate(&board), GameResult::Undecided);

        let board = board_with(3, &[], &[(0, 0), (1, 1), (2, 2)]);
        assert_eq!(evaluate(&board), GameResult::Undecided);
    }

    #[test]
    fn test_second_straight_row() {
        let board = board_with(3, &[], &[(1, 0), (1, 1), (1, 2)]);
        assert_eq!(evaluate(&board), GameResult::SecondWins);
    }

    #[test]
    fn test_second_up_right_diagonal() {
        // (1,0) -> (0,1) via UpRight, then right along row 0
        let board = board_with(3, &[], &[(1, 0), (0, 1), (0, 2)]);
        assert_eq!(evaluate(&board), GameResult::SecondWins);
    }

    #[test]
    fn test_winding_path() {
        // First goes down, back up and around a Second wall
        let first = [(0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (2, 2), (1, 3), (2, 3), (3, 3), (4, 3)];
        let board = board_with(5, &first, &[(1, 1), (2, 1)]);
        assert_eq!(evaluate(&board), GameResult::FirstWins);
        assert!(!has_connection(&board, Player::Second));
    }

    #[test]
    fn test_row_zero_only_is_not_a_win() {
        let board = board_with(4, &[(0, 0), (0, 1), (0, 2), (0, 3)], &[]);
        assert_eq!(evaluate(&board), GameResult::Undecided);
        // But it spans Second's edges if Second owned it
        let board = board_with(4, &[], &[(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(evaluate(&board), GameResult::SecondWins);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let board = board_with(3, &[(0, 1), (1, 0)], &[(1, 1)]);
        let first = evaluate(&board);
        let second = evaluate(&board);
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_boards_have_exactly_one_winner() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let size = rng.gen_range(1..=9);
            let board = random_full_board(size, &mut rng);
            let first = has_connection(&board, Player::First);
            let second = has_connection(&board, Player::Second);
            assert!(first != second, "size {}\n{}", size, board);
            assert_ne!(evaluate(&board), GameResult::Undecided);
        }
    }

    #[test]
    fn test_down_right_filled_board() {
        // Checkerboard-like fill where a square-grid diagonal bug would
        // let both players claim a connection.
        let mut board = Board::new(4).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                let player = if (row + col) % 2 == 0 { Player::First } else { Player::Second };
                board.set(Cell::new(row, col), player.occupant());
            }
        }
        let first = has_connection(&board, Player::First);
        let second = has_connection(&board, Player::Second);
        assert!(first ^ second);
    }
}
