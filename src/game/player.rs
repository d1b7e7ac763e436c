use serde::{Deserialize, Serialize};

use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Player1 => Cell::Player1,
            Player::Player2 => Cell::Player2,
        }
    }

    /// The player who makes the move at zero-based `index` in a move list.
    pub fn for_move(index: usize) -> Player {
        if index % 2 == 0 {
            Player::Player1
        } else {
            Player::Player2
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Player1 => "Player1",
            Player::Player2 => "Player2",
        }
    }

    /// Label used in replay output (`player_1` / `player_2`).
    pub fn label(self) -> &'static str {
        match self {
            Player::Player1 => "player_1",
            Player::Player2 => "player_2",
        }
    }
}
