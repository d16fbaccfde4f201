//! Players, moves, results and turn-tracking game state

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Occupant};
use crate::error::{HexError, Result};
use crate::rules;
use crate::win;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player identity. First (black) connects top and bottom rows,
/// Second (white) connects left and right columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First = 0,
    Second = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Cell state for a stone of this player
    pub fn occupant(self) -> Occupant {
        match self {
            Player::First => Occupant::OwnedByFirst,
            Player::Second => Occupant::OwnedBySecond,
        }
    }

    /// Stone color name
    pub fn color(self) -> &'static str {
        match self {
            Player::First => "black",
            Player::Second => "white",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}

impl FromStr for Player {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Player::First),
            "white" => Ok(Player::Second),
            other => Err(HexError::InvalidConfiguration(format!(
                "player color must be 'black' or 'white', not '{}'",
                other
            ))),
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Undecided,
    FirstWins,
    SecondWins,
}

impl GameResult {
    /// Result in which `player` has won
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::First => GameResult::FirstWins,
            Player::Second => GameResult::SecondWins,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Undecided => None,
            GameResult::FirstWins => Some(Player::First),
            GameResult::SecondWins => Some(Player::Second),
        }
    }

    pub fn is_decided(self) -> bool {
        self != GameResult::Undecided
    }
}

/// A move: a stone placement or one of the two special actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Place(Cell),
    Pass,
    Resign,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Board plus turn order, result and move history
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_play: Player,
    result: GameResult,
    history: Vec<Move>,
}

impl Game {
    /// New game on an empty board, First to move
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self {
            board: Board::new(size)?,
            to_play: Player::First,
            result: GameResult::Undecided,
            history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player whose turn it is
    pub fn to_play(&self) -> Player {
        self.to_play
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Moves played so far, alternating from First
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Legal moves for the player to move (none once decided)
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.result.is_decided() {
            return vec![];
        }
        let mut moves: Vec<Move> = self.board.empty_cells().into_iter().map(Move::Place).collect();
        moves.push(Move::Pass);
        moves.push(Move::Resign);
        moves
    }

    /// Play a move for the player to move, returning the new result
    pub fn play(&mut self, mv: Move) -> Result<GameResult> {
        if self.result.is_decided() {
            return Err(HexError::GameOver);
        }

        match mv {
            Move::Place(cell) => {
                if !rules::is_legal(&self.board, cell.row, cell.col)? {
                    return Err(HexError::IllegalMove {
                        row: cell.row,
                        col: cell.col,
                    });
                }
                rules::apply(&mut self.board, cell.row, cell.col, self.to_play)?;
                self.result = win::evaluate(&self.board);
            }
            Move::Pass => {}
            Move::Resign => {
                self.result = GameResult::win_for(self.to_play.opponent());
            }
        }

        self.history.push(mv);
        self.to_play = self.to_play.opponent();
        Ok(self.result)
    }
}

// ============================================================================
// TESTS
// ============================================================================
