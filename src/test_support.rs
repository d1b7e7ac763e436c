//! Shared fixtures for unit tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::GameState;

/// Fills the standard board with no four-in-a-row anywhere. Columns 0, 1, 4
/// and 5 read Player1/Player2 alternating from the bottom; columns 2, 3 and 6
/// start with Player2. Column 5 is opened early and finished last so both
/// column kinds can be filled while players alternate.
pub const DRAW_MOVES: &[usize] = &[
    0, 0, 0, 0, 0, 0, //
    1, 1, 1, 1, 1, 1, //
    4, 4, 4, 4, 4, 4, //
    5, //
    2, 2, 2, 2, 2, 2, //
    3, 3, 3, 3, 3, 3, //
    6, 6, 6, 6, 6, 6, //
    5, 5, 5, 5, 5,
];

/// On a 4x3 board, Player2's final move fills the last cell and completes
/// column 2.
pub const WIN_ON_LAST_CELL: (usize, usize, &[usize]) =
    (4, 3, &[0, 2, 0, 2, 0, 2, 1, 0, 1, 1, 1, 2]);

/// Apply every move, panicking if one is rejected.
pub fn play(state: &GameState, moves: &[usize]) -> GameState {
    moves.iter().fold(state.clone(), |state, &col| {
        let (next, row) = state.drop_piece(col);
        assert!(row.is_some(), "move into column {col} was rejected");
        next
    })
}

/// Moves of a random game played to the end with legal columns only, then
/// a few extra columns that a finished game must ignore.
pub fn random_game(seed: u64, rows: usize, cols: usize) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::with_size(rows, cols);
    let mut moves = Vec::new();
    while !state.is_terminal() {
        let legal = state.legal_actions();
        let col = legal[rng.random_range(0..legal.len())];
        state = state.drop_piece(col).0;
        moves.push(col);
    }
    moves.extend((0..3).map(|_| rng.random_range(0..cols)));
    moves
}
