use serde::{Deserialize, Serialize};

use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of same-player pieces in a line needed to win.
pub const WIN_LENGTH: usize = 4;

/// Line directions checked through a placed piece, in search order:
/// horizontal, vertical, diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(Player::Player1),
            Cell::Player2 => Some(Player::Player2),
        }
    }
}

/// A `(row, col)` cell address. Serialized as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl From<[usize; 2]> for Position {
    fn from([row, col]: [usize; 2]) -> Self {
        Position { row, col }
    }
}

impl From<Position> for [usize; 2] {
    fn from(pos: Position) -> Self {
        [pos.row, pos.col]
    }
}

/// A winning line: exactly four collinear positions.
pub type WinningLine = [Position; WIN_LENGTH];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the standard dimensions
    pub fn new() -> Self {
        Self::empty(ROWS, COLS)
    }

    /// Create an empty board of any positive size.
    pub fn empty(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be positive, got {rows}x{cols}");
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Build a board from rows of cells, top row first. Returns `None` for an
    /// empty or ragged grid.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Board {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row `rows - 1` is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Place a player's piece, ignoring gravity. Callers find the row first.
    pub(crate) fn place(&mut self, row: usize, col: usize, player: Player) {
        self.cells[row * self.cols + col] = player.to_cell();
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        self.lowest_free_row(col).is_none()
    }

    /// Row a piece dropped into `col` would land in, scanning up from the
    /// bottom. `None` means the column is full.
    ///
    /// Panics if `col` is outside the board: only in-range columns are
    /// meaningful moves.
    pub fn lowest_free_row(&self, col: usize) -> Option<usize> {
        assert!(
            col < self.cols,
            "column {col} out of range (board has {} columns)",
            self.cols
        );
        (0..self.rows).rev().find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// True when the whole top row is occupied.
    ///
    /// This equals "board full" only while every column fills bottom-up.
    pub fn check_draw(&self) -> bool {
        (0..self.cols).all(|col| self.get(0, col) != Cell::Empty)
    }

    /// Check whether the piece at (row, col) completes a line of four for
    /// `player`, returning the first matching window.
    ///
    /// Directions are tried horizontal, vertical, down-right, down-left; within
    /// a direction the window slides from three cells behind (row, col) up to
    /// starting on it. Runs longer than four report only the first window.
    pub fn check_win(&self, row: usize, col: usize, player: Player) -> Option<WinningLine> {
        let target = player.to_cell();
        DIRECTIONS.iter().find_map(|&(dr, dc)| {
            (-(WIN_LENGTH as isize - 1)..=0)
                .find_map(|offset| self.window(row, col, dr, dc, offset, target))
        })
    }

    fn window(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
        offset: isize,
        target: Cell,
    ) -> Option<WinningLine> {
        let mut line = [Position::new(0, 0); WIN_LENGTH];
        for (j, slot) in line.iter_mut().enumerate() {
            let step = offset + j as isize;
            let r = row as isize + dr * step;
            let c = col as isize + dc * step;
            if r < 0 || c < 0 || r as usize >= self.rows || c as usize >= self.cols {
                return None;
            }
            let (r, c) = (r as usize, c as usize);
            if self.get(r, c) != target {
                return None;
            }
            *slot = Position::new(r, c);
        }
        Some(line)
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Cell::Empty).count()
    }

    /// True when no piece sits above an empty cell in its column.
    pub fn is_settled(&self) -> bool {
        (0..self.cols).all(|col| {
            (1..self.rows).all(|row| {
                self.get(row - 1, col) == Cell::Empty || self.get(row, col) != Cell::Empty
            })
        })
    }

    /// Rows of cells, top row first.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols).map(|r| r.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
