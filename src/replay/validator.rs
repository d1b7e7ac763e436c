use log::debug;

use crate::game::{Board, Player, Position, COLS, ROWS};

use super::step::{StepRecord, StepStatus, ValidationOutput, WinnerInfo};

/// Replay `moves` on a fresh standard board and record every step.
///
/// Players alternate strictly from Player1 by move index. Once a step is
/// `win` or `draw`, and whenever a move targets a full column, the step
/// repeats the previous record unchanged.
///
/// Panics if a move is outside the board's columns.
pub fn validate(moves: &[usize]) -> ValidationOutput {
    validate_on(ROWS, COLS, moves)
}

/// [`validate`] on a board of any positive size.
pub fn validate_on(rows: usize, cols: usize, moves: &[usize]) -> ValidationOutput {
    let mut board = Board::empty(rows, cols);
    let mut player_1: Vec<Position> = Vec::new();
    let mut player_2: Vec<Position> = Vec::new();

    let mut steps = Vec::with_capacity(moves.len() + 1);
    steps.push(StepRecord::waiting());

    for (index, &col) in moves.iter().enumerate() {
        let previous: &StepRecord = &steps[index];

        let row = if previous.status.is_terminal() {
            None
        } else {
            board.lowest_free_row(col)
        };

        let Some(row) = row else {
            debug!("step {}: column {col} carried forward", index + 1);
            let copy = previous.clone();
            steps.push(copy);
            continue;
        };

        let player = Player::for_move(index);
        board.place(row, col, player);
        match player {
            Player::Player1 => player_1.push(Position::new(row, col)),
            Player::Player2 => player_2.push(Position::new(row, col)),
        }

        let (status, winner) = match board.check_win(row, col, player) {
            Some(positions) => (
                StepStatus::Win,
                Some(WinnerInfo {
                    who: player,
                    positions,
                }),
            ),
            None if board.check_draw() => (StepStatus::Draw, None),
            None => (StepStatus::Pending, None),
        };

        debug!(
            "step {}: {} -> ({row}, {col}) {}",
            index + 1,
            player.name(),
            status.as_str()
        );

        steps.push(StepRecord {
            player_1: player_1.clone(),
            player_2: player_2.clone(),
            status,
            winner,
        });
    }

    ValidationOutput::new(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, GameStatus};
    use crate::test_support::{random_game, DRAW_MOVES, WIN_ON_LAST_CELL};

    /// Replays moves through the live engine and checks every step against
    /// the validator's record.
    fn assert_engine_agrees(rows: usize, cols: usize, moves: &[usize]) {
        let output = validate_on(rows, cols, moves);
        assert_eq!(output.len(), moves.len() + 1);

        let mut state = GameState::with_size(rows, cols);
        for (i, &col) in moves.iter().enumerate() {
            let (next, _) = state.drop_piece(col);
            state = next;
            let record = output.step(i + 1).unwrap();

            for player in [Player::Player1, Player::Player2] {
                let mut live: Vec<Position> = Vec::new();
                for r in 0..rows {
                    for c in 0..cols {
                        if state.board().get(r, c).player() == Some(player) {
                            live.push(Position::new(r, c));
                        }
                    }
                }
                let mut replayed = record.pieces(player).to_vec();
                replayed.sort_by_key(|p| (p.row, p.col));
                assert_eq!(replayed, live, "pieces differ at step {}", i + 1);
            }

            match state.status() {
                GameStatus::InProgress => {
                    assert_eq!(record.status, StepStatus::Pending, "step {}", i + 1);
                    assert!(record.winner.is_none());
                }
                GameStatus::Drawn => {
                    assert_eq!(record.status, StepStatus::Draw, "step {}", i + 1);
                    assert!(record.winner.is_none());
                }
                GameStatus::Won { winner, line } => {
                    assert_eq!(record.status, StepStatus::Win, "step {}", i + 1);
                    let info = record.winner.unwrap();
                    assert_eq!(info.who, winner);
                    assert_eq!(info.positions, line);
                }
            }
        }
    }

    #[test]
    fn test_empty_moves_gives_waiting_step() {
        let output = validate(&[]);
        assert_eq!(output.len(), 1);
        assert_eq!(output.get("step_0"), Some(&StepRecord::waiting()));
        assert_eq!(output.last().status, StepStatus::Waiting);
    }

    #[test]
    fn test_step_records_accumulate_positions() {
        let output = validate(&[3, 3, 4]);
        let step_1 = output.get("step_1").unwrap();
        assert_eq!(step_1.player_1, vec![Position::new(5, 3)]);
        assert!(step_1.player_2.is_empty());
        assert_eq!(step_1.status, StepStatus::Pending);

        let step_3 = output.get("step_3").unwrap();
        assert_eq!(step_3.player_1, vec![Position::new(5, 3), Position::new(5, 4)]);
        assert_eq!(step_3.player_2, vec![Position::new(4, 3)]);
        // Earlier records are not affected by later steps
        assert_eq!(output.get("step_1").unwrap().player_1.len(), 1);
    }

    #[test]
    fn test_interrupted_column_stays_pending() {
        let output = validate(&[3, 3, 3, 2, 3]);
        let step_5 = output.get("step_5").unwrap();
        assert_eq!(step_5.status, StepStatus::Pending);
        assert_eq!(
            step_5.player_1,
            vec![Position::new(5, 3), Position::new(3, 3), Position::new(2, 3)]
        );
        assert_eq!(step_5.player_2, vec![Position::new(4, 3), Position::new(5, 2)]);

        let output = validate(&[3, 3, 3, 2, 3, 6, 3]);
        assert_eq!(output.last().status, StepStatus::Pending);
    }

    #[test]
    fn test_vertical_win_scenario() {
        let output = validate(&[3, 2, 3, 2, 3, 4, 3]);
        assert_eq!(output.get("step_6").unwrap().status, StepStatus::Pending);

        let step_7 = output.get("step_7").unwrap();
        assert_eq!(step_7.status, StepStatus::Win);
        let winner = step_7.winner.unwrap();
        assert_eq!(winner.who, Player::Player1);
        assert_eq!(
            winner.positions,
            [
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(4, 3),
                Position::new(5, 3)
            ]
        );
    }

    #[test]
    fn test_steps_after_win_are_frozen() {
        let output = validate(&[0, 1, 0, 1, 0, 1, 0, 1, 2, 6]);
        let win = output.get("step_7").unwrap();
        assert_eq!(win.status, StepStatus::Win);
        for label in ["step_8", "step_9", "step_10"] {
            assert_eq!(output.get(label), Some(win));
        }
    }

    #[test]
    fn test_full_column_carries_previous_step() {
        let output = validate(&[0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(output.get("step_7"), output.get("step_6"));
        assert_eq!(output.get("step_6").unwrap().player_1.len(), 3);

        // Parity keeps running by index: move 8 belongs to Player2 even
        // though move 7 was rejected.
        let step_8 = output.get("step_8").unwrap();
        assert_eq!(step_8.player_2.len(), 4);
        assert_eq!(step_8.player_2[3], Position::new(5, 1));
    }

    #[test]
    fn test_draw_scenario() {
        let output = validate(DRAW_MOVES);
        let last = output.last();
        assert_eq!(last.status, StepStatus::Draw);
        assert!(last.winner.is_none());
        assert_eq!(last.player_1.len() + last.player_2.len(), ROWS * COLS);
        let before = output.step(DRAW_MOVES.len() - 1).unwrap();
        assert_eq!(before.status, StepStatus::Pending);
    }

    #[test]
    fn test_win_on_last_cell_is_win() {
        let (rows, cols, moves) = WIN_ON_LAST_CELL;
        let output = validate_on(rows, cols, moves);
        let last = output.last();
        assert_eq!(last.status, StepStatus::Win);
        assert_eq!(last.winner.unwrap().who, Player::Player2);
    }

    #[test]
    fn test_validate_is_deterministic() {
        let moves = random_game(7, ROWS, COLS);
        assert_eq!(validate(&moves), validate(&moves));
    }

    #[test]
    fn test_agrees_with_engine_on_fixtures() {
        assert_engine_agrees(ROWS, COLS, DRAW_MOVES);
        assert_engine_agrees(ROWS, COLS, &[3, 2, 3, 2, 3, 4, 3, 5, 5]);
        let (rows, cols, moves) = WIN_ON_LAST_CELL;
        assert_engine_agrees(rows, cols, moves);
    }

    #[test]
    fn test_agrees_with_engine_on_random_games() {
        for seed in 0..200 {
            let moves = random_game(seed, ROWS, COLS);
            assert_engine_agrees(ROWS, COLS, &moves);
        }
        for seed in 0..50 {
            let moves = random_game(seed, 4, 4);
            assert_engine_agrees(4, 4, &moves);
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_move_panics() {
        validate(&[1, COLS]);
    }
}
