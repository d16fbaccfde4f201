//! Square board geometry with hex adjacency

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HexError, Result};
use crate::game::Player;

/// Neighbor offsets (drow, dcol) that turn a square grid into a hex tiling
/// Order: Left, Right, Up, Down, UpRight, DownLeft
pub const NEIGHBOR_OFFSETS: [(isize, isize); 6] = [
    (0, -1),  // Left
    (0, 1),   // Right
    (-1, 0),  // Up
    (1, 0),   // Down
    (-1, 1),  // UpRight
    (1, -1),  // DownLeft
];

/// Board coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Occupancy of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    #[default]
    Empty,
    OwnedByFirst,
    OwnedBySecond,
}

impl Occupant {
    /// Owning player, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Occupant::Empty => None,
            Occupant::OwnedByFirst => Some(Player::First),
            Occupant::OwnedBySecond => Some(Player::Second),
        }
    }

    /// Single-character marker used by the text dump
    pub fn marker(self) -> char {
        match self {
            Occupant::Empty => '.',
            Occupant::OwnedByFirst => 'B',
            Occupant::OwnedBySecond => 'W',
        }
    }
}

/// Fixed-size square board, one occupant per cell (row-major)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    cells: Vec<Occupant>,
}

/// Unchecked serialized form
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Occupant>,
}

impl TryFrom<RawBoard> for Board {
    type Error = HexError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let mut board = Board::new(raw.size)?;
        if raw.cells.len() != board.cells.len() {
            return Err(HexError::InvalidConfiguration(format!(
                "expected {} cells for a {}x{} board, got {}",
                board.cells.len(),
                raw.size,
                raw.size,
                raw.cells.len()
            )));
        }
        board.cells = raw.cells;
        Ok(board)
    }
}

impl Board {
    /// Create an empty board of side `size`
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(HexError::InvalidConfiguration(
                "board size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            size,
            cells: vec![Occupant::Empty; size * size],
        })
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if coordinates are on the board
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Occupant of (row, col)
    pub fn occupant(&self, row: usize, col: usize) -> Result<Occupant> {
        self.check(row, col)?;
        Ok(self.at(row, col))
    }

    /// All occupants in row-major order
    pub fn cells(&self) -> &[Occupant] {
        &self.cells
    }

    /// Range-check coordinates, returning the cell
    pub fn check(&self, row: usize, col: usize) -> Result<Cell> {
        if self.contains(row, col) {
            Ok(Cell::new(row, col))
        } else {
            Err(HexError::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }

    /// Linearized index `row * size + col`
    pub fn index(&self, cell: Cell) -> usize {
        cell.row * self.size + cell.col
    }

    /// Inverse of [`Board::index`]
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.size, index % self.size)
    }

    /// In-bounds hex neighbors of a cell
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            self.contains(row, col).then(|| Cell::new(row, col))
        })
    }

    /// All empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &occ)| occ == Occupant::Empty)
            .map(|(i, _)| self.cell_at(i))
            .collect()
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&occ| occ != Occupant::Empty)
    }

    /// Number of stones owned by a player
    pub fn stone_count(&self, player: Player) -> usize {
        let target = player.occupant();
        self.cells.iter().filter(|&&occ| occ == target).count()
    }

    /// Unchecked read; callers guarantee the coordinates are in range
    pub(crate) fn at(&self, row: usize, col: usize) -> Occupant {
        self.cells[row * self.size + col]
    }

    pub(crate) fn set(&mut self, cell: Cell, occupant: Occupant) {
        let index = self.index(cell);
        self.cells[index] = occupant;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for col in 0..self.size {
            write!(f, "{} ", col % 10)?;
        }
        writeln!(f)?;

        // Each row shifts right by one step, giving the rhombus outline
        for row in 0..self.size {
            write!(f, "{:>2}  {}", row, " ".repeat(row))?;
            for col in 0..self.size {
                write!(f, "{} ", self.at(row, col).marker())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
