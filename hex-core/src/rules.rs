//! Move validation and application
//!
//! The two checks are kept apart: `apply` trusts the caller to have asked
//! `is_legal` first, and drivers decide what an illegal move means.

use crate::board::{Board, Occupant};
use crate::error::Result;
use crate::game::Player;

/// True iff (row, col) is empty
pub fn is_legal(board: &Board, row: usize, col: usize) -> Result<bool> {
    Ok(board.occupant(row, col)? == Occupant::Empty)
}

/// Record a stone for `player` at (row, col)
pub fn apply(board: &mut Board, row: usize, col: usize, player: Player) -> Result<()> {
    let cell = board.check(row, col)?;
    debug_assert_eq!(board.at(row, col), Occupant::Empty, "apply on occupied cell");
    board.set(cell, player.occupant());
    Ok(())
}
