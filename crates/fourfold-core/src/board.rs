//! Gravity-drop board for Connect Four.
//!
//! The grid is stored column-major as `cells[column][row]`. Row `0` is the
//! top of a column and row `ROWS - 1` the bottom, so a dropped stone scans
//! upward from `ROWS - 1` until it finds an empty cell.
//!
//! Invariants maintained by every mutation except [`Board::set`]:
//! - a cell, once non-zero, never becomes zero again
//! - within a column, non-zero cells are contiguous from the bottom row up

use serde::{Deserialize, Serialize};

/// Number of columns on the board.
pub const COLUMNS: usize = 7;

/// Number of rows on the board.
pub const ROWS: usize = 6;

/// Length of a winning run.
pub const RUN_LENGTH: usize = 4;

/// Value of an unoccupied cell.
pub const EMPTY: u8 = 0;

/// A single cell that differs between two boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellChange {
    pub column: u8,
    pub row: u8,
    pub stone: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[u8; ROWS]; COLUMNS],
}

// Direction vectors as (column step, row step). Rows grow downward, so
// "up-right" decreases the row index.
const DIRECTIONS: [(isize, isize); 4] = [
    (1, 0),  // horizontal
    (0, 1),  // vertical
    (1, -1), // diagonal up-right
    (1, 1),  // diagonal down-right
];

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [[EMPTY; ROWS]; COLUMNS],
        }
    }

    /// Bounds-checked read of a single cell
    pub fn get(&self, column: usize, row: usize) -> Option<u8> {
        self.cells.get(column).and_then(|col| col.get(row)).copied()
    }

    /// Bounds-checked raw write. Bypasses gravity; only delta application
    /// should call this, since it trusts the sender's board.
    pub fn set(&mut self, column: usize, row: usize, stone: u8) -> bool {
        match self.cells.get_mut(column).and_then(|col| col.get_mut(row)) {
            Some(cell) => {
                *cell = stone;
                true
            }
            None => false,
        }
    }

    /// Whether a stone may be dropped into `column`.
    pub fn can_drop(&self, column: usize) -> bool {
        column < COLUMNS && self.cells[column][0] == EMPTY
    }

    /// Row a stone dropped into `column` would come to rest on.
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if !self.can_drop(column) {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[column][row] == EMPTY)
    }

    /// Drop `stone` into `column`. Returns false, leaving the board untouched,
    /// when the column is out of range or already full.
    pub fn drop_stone(&mut self, column: usize, stone: u8) -> bool {
        match self.landing_row(column) {
            Some(row) => {
                self.cells[column][row] = stone;
                true
            }
            None => false,
        }
    }

    /// True when every column's top cell is occupied.
    pub fn is_full(&self) -> bool {
        (0..COLUMNS).all(|column| !self.can_drop(column))
    }

    /// True if `player` owns four contiguous cells in any of the four
    /// directions. Short-circuits on the first run found.
    pub fn evaluate(&self, player: u8) -> bool {
        if player == EMPTY {
            return false;
        }

        DIRECTIONS.iter().any(|&(dc, dr)| {
            (0..COLUMNS).any(|column| {
                (0..ROWS).any(|row| self.run_from(column, row, dc, dr, player))
            })
        })
    }

    fn run_from(&self, column: usize, row: usize, dc: isize, dr: isize, player: u8) -> bool {
        (0..RUN_LENGTH as isize).all(|step| {
            let c = column as isize + dc * step;
            let r = row as isize + dr * step;
            c >= 0
                && r >= 0
                && self.get(c as usize, r as usize) == Some(player)
        })
    }

    /// Every coordinate whose value differs between `before` and `after`,
    /// scanned row by row from the top.
    pub fn diff(before: &Board, after: &Board) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for row in 0..ROWS {
            for column in 0..COLUMNS {
                let stone = after.cells[column][row];
                if before.cells[column][row] != stone {
                    changes.push(CellChange {
                        column: column as u8,
                        row: row as u8,
                        stone,
                    });
                }
            }
        }
        changes
    }

    /// Flatten to `COLUMNS * ROWS` bytes at `index = column * ROWS + row`.
    pub fn flatten(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|col| col.iter().copied()).collect()
    }

    /// Inverse of [`Board::flatten`]. Returns `None` on a length mismatch.
    pub fn from_flat(cells: &[u8]) -> Option<Self> {
        if cells.len() != COLUMNS * ROWS {
            return None;
        }
        let mut board = Self::new();
        for (column, chunk) in cells.chunks_exact(ROWS).enumerate() {
            board.cells[column].copy_from_slice(chunk);
        }
        Some(board)
    }

    /// Number of occupied cells
    pub fn stones(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|col| col.iter())
            .filter(|&&cell| cell != EMPTY)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
