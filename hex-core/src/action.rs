//! Discrete action encoding
//!
//! Indices `0..size²` are cells in row-major order, `size²` is pass and
//! `size² + 1` is resign.

use crate::board::Cell;
use crate::error::{HexError, Result};
use crate::game::Move;

/// Number of discrete actions on a board of side `size`
pub fn action_space(size: usize) -> usize {
    size * size + 2
}

impl Move {
    /// Decode an action index
    pub fn from_action(size: usize, action: usize) -> Result<Move> {
        let cells = size * size;
        match action {
            a if a < cells => Ok(Move::Place(Cell::new(a / size, a % size))),
            a if a == cells => Ok(Move::Pass),
            a if a == cells + 1 => Ok(Move::Resign),
            _ => Err(HexError::ActionOutOfRange { action, size }),
        }
    }

    /// Encode as an action index
    pub fn to_action(self, size: usize) -> usize {
        match self {
            Move::Place(cell) => cell.row * size + cell.col,
            Move::Pass => size * size,
            Move::Resign => size * size + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_space() {
        assert_eq!(action_space(1), 3);
        assert_eq!(action_space(11), 123);
    }

    #[test]
    fn test_decode_special_actions() {
        assert_eq!(Move::from_action(3, 9).unwrap(), Move::Pass);
        assert_eq!(Move::from_action(3, 10).unwrap(), Move::Resign);
        assert_eq!(
            Move::from_action(3, 11),
            Err(HexError::ActionOutOfRange { action: 11, size: 3 })
        );
    }

    #[test]
    fn test_decode_cell() {
        assert_eq!(Move::from_action(4, 6).unwrap(), Move::Place(Cell::new(1, 2)));
        assert_eq!(Move::Place(Cell::new(1, 2)).to_action(4), 6);
    }
}
