use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::game::{Board, Cell, GameState, GameStatus, Player, Position, COLS, ROWS, WIN_LENGTH};

/// The persisted form of a game, as stored under the storage key.
///
/// Board cells are `null`, `"Player1"` or `"Player2"`, top row first.
/// Blobs written before the move list was recorded have no `steps` field;
/// they load with an empty move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub board: Vec<Vec<Option<Player>>>,
    pub current_player: Player,
    pub is_game_over: bool,
    pub winner: Option<Player>,
    #[serde(default)]
    pub winning_positions: Vec<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<usize>>,
}

impl SavedGame {
    pub fn from_state(state: &GameState) -> Self {
        let board = state
            .board()
            .to_rows()
            .into_iter()
            .map(|row| row.into_iter().map(Cell::player).collect())
            .collect();
        SavedGame {
            board,
            current_player: state.current_player(),
            is_game_over: state.is_terminal(),
            winner: state.winner(),
            winning_positions: state.winning_line().to_vec(),
            steps: Some(state.moves().to_vec()),
        }
    }
}

fn malformed(msg: impl Into<String>) -> StorageError {
    StorageError::Malformed(msg.into())
}

fn has_line_of_four(board: &Board) -> bool {
    (0..board.rows()).any(|row| {
        (0..board.cols()).any(|col| {
            board
                .get(row, col)
                .player()
                .is_some_and(|player| board.check_win(row, col, player).is_some())
        })
    })
}

impl TryFrom<SavedGame> for GameState {
    type Error = StorageError;

    fn try_from(saved: SavedGame) -> Result<Self, Self::Error> {
        if saved.board.len() != ROWS {
            return Err(malformed(format!(
                "board has {} rows, expected {ROWS}",
                saved.board.len()
            )));
        }
        if let Some(row) = saved.board.iter().find(|row| row.len() != COLS) {
            return Err(malformed(format!(
                "board row has {} columns, expected {COLS}",
                row.len()
            )));
        }

        let cells = saved
            .board
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.map_or(Cell::Empty, Player::to_cell))
                    .collect()
            })
            .collect();
        let board = Board::from_rows(cells).ok_or_else(|| malformed("board is empty"))?;
        if !board.is_settled() {
            return Err(malformed("board has a piece above an empty cell"));
        }

        let status = match (saved.is_game_over, saved.winner) {
            (true, Some(winner)) => {
                let line: [Position; WIN_LENGTH] = saved
                    .winning_positions
                    .as_slice()
                    .try_into()
                    .map_err(|_| {
                        malformed(format!(
                            "winning line has {} positions, expected {WIN_LENGTH}",
                            saved.winning_positions.len()
                        ))
                    })?;
                let on_board = line.iter().all(|p| p.row < ROWS && p.col < COLS);
                let reproduced = on_board
                    && line
                        .iter()
                        .any(|p| board.check_win(p.row, p.col, winner) == Some(line));
                if !reproduced {
                    return Err(malformed("winning line does not match the board"));
                }
                if saved.current_player != winner {
                    return Err(malformed("current player is not the winner"));
                }
                GameStatus::Won { winner, line }
            }
            (true, None) => {
                if !board.check_draw() {
                    return Err(malformed("game over without a winner on a board that is not full"));
                }
                GameStatus::Drawn
            }
            (false, None) => {
                if has_line_of_four(&board) {
                    return Err(malformed("game in progress already has four in a row"));
                }
                GameStatus::InProgress
            }
            (false, Some(_)) => return Err(malformed("winner recorded for a game in progress")),
        };
        if !status.is_terminal() && !saved.winning_positions.is_empty() {
            return Err(malformed("winning line recorded without a winner"));
        }

        let moves = match saved.steps {
            Some(moves) => {
                if let Some(&col) = moves.iter().find(|&&col| col >= COLS) {
                    return Err(malformed(format!("move column {col} is off the board")));
                }
                if moves.len() != board.occupied() {
                    return Err(malformed(format!(
                        "{} moves recorded for {} pieces on the board",
                        moves.len(),
                        board.occupied()
                    )));
                }
                moves
            }
            None => {
                warn!("saved game has no move list, history starts empty");
                Vec::new()
            }
        };

        Ok(GameState::from_parts(board, saved.current_player, status, moves))
    }
}
