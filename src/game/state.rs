use log::debug;

use super::{Board, Player, Position, WinningLine, COLS, ROWS};

/// Where a game stands. `Won` and `Drawn` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won { winner: Player, line: WinningLine },
    Drawn,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
    moves: Vec<usize>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        Self::with_size(ROWS, COLS)
    }

    /// Initial state on a board of any positive size.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        GameState {
            board: Board::empty(rows, cols),
            current_player: Player::Player1, // Player1 starts
            status: GameStatus::InProgress,
            moves: Vec::new(),
        }
    }

    /// Reassemble a state from already-checked parts.
    pub(crate) fn from_parts(
        board: Board,
        current_player: Player,
        status: GameStatus,
        moves: Vec<usize>,
    ) -> Self {
        GameState {
            board,
            current_player,
            status,
            moves,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won { winner, .. } => Some(winner),
            _ => None,
        }
    }

    /// The four winning positions, or an empty slice.
    pub fn winning_line(&self) -> &[Position] {
        match &self.status {
            GameStatus::Won { line, .. } => line.as_slice(),
            _ => &[],
        }
    }

    /// Columns played so far, in order.
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..self.board.cols())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Returns the next state and the landing row. A move on a finished game
    /// or into a full column is rejected: the state comes back unchanged with
    /// no landing row. The receiver is never modified.
    ///
    /// Panics if `column` is off the board.
    pub fn drop_piece(&self, column: usize) -> (GameState, Option<usize>) {
        if self.is_terminal() {
            debug!("rejected drop in column {column}: game is over");
            return (self.clone(), None);
        }

        let Some(row) = self.board.lowest_free_row(column) else {
            debug!("rejected drop in column {column}: column is full");
            return (self.clone(), None);
        };

        let player = self.current_player;
        let mut board = self.board.clone();
        board.place(row, column, player);

        let mut moves = self.moves.clone();
        moves.push(column);

        // Win check runs first so a board-filling win is never a draw
        let (status, current_player) = if let Some(line) = board.check_win(row, column, player) {
            (GameStatus::Won { winner: player, line }, player)
        } else if board.check_draw() {
            (GameStatus::Drawn, player)
        } else {
            (GameStatus::InProgress, player.other())
        };

        debug!(
            "move {}: {} -> ({row}, {column}), status {:?}",
            moves.len(),
            player.name(),
            status
        );

        let next = GameState {
            board,
            current_player,
            status,
            moves,
        };
        (next, Some(row))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
