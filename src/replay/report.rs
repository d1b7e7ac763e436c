//! Human-readable audit trail for a replayed game.

use std::fmt::Write;

use crate::game::Player;

use super::step::{step_label, StepRecord, StepStatus, ValidationOutput};

/// Text lines describing step `index` of a replay of `moves`.
pub fn describe_step(index: usize, record: &StepRecord, moves: &[usize]) -> Vec<String> {
    let mut lines = vec![step_label(index).to_uppercase()];

    if index > 0 {
        if let Some(&col) = moves.get(index - 1) {
            let player = Player::for_move(index - 1);
            lines.push(format!("Move: {} dropped into column {}", player.name(), col + 1));
        }
    }

    lines.push(format!("Status: {}", record.status.as_str().to_uppercase()));

    if let (StepStatus::Win, Some(winner)) = (record.status, &record.winner) {
        lines.push(format!("Winner: {}", winner.who.label().to_uppercase()));
        let positions: Vec<String> = winner
            .positions
            .iter()
            .map(|p| format!("[{}, {}]", p.row, p.col))
            .collect();
        lines.push(format!("Winning line: {}", positions.join(", ")));
    }

    lines.push(format!(
        "Pieces: Player1 {}, Player2 {}",
        record.player_1.len(),
        record.player_2.len()
    ));
    lines
}

/// The whole audit trail, one blank-line separated block per step.
pub fn render_report(output: &ValidationOutput, moves: &[usize]) -> String {
    let mut text = String::new();
    for (index, record) in output.steps().iter().enumerate() {
        if index > 0 {
            text.push('\n');
        }
        for line in describe_step(index, record, moves) {
            let _ = writeln!(text, "{line}");
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::validate;

    #[test]
    fn test_describe_waiting_step() {
        let output = validate(&[]);
        let lines = describe_step(0, output.step(0).unwrap(), &[]);
        assert_eq!(
            lines,
            vec!["STEP_0", "Status: WAITING", "Pieces: Player1 0, Player2 0"]
        );
    }

    #[test]
    fn test_describe_move_uses_one_based_column() {
        let moves = [3, 0];
        let output = validate(&moves);
        let lines = describe_step(2, output.step(2).unwrap(), &moves);
        assert_eq!(lines[0], "STEP_2");
        assert_eq!(lines[1], "Move: Player2 dropped into column 1");
        assert_eq!(lines[2], "Status: PENDING");
        assert_eq!(lines[3], "Pieces: Player1 1, Player2 1");
    }

    #[test]
    fn test_describe_win_lists_line() {
        let moves = [0, 1, 0, 1, 0, 1, 0];
        let output = validate(&moves);
        let lines = describe_step(7, output.last(), &moves);
        assert!(lines.contains(&"Status: WIN".to_string()));
        assert!(lines.contains(&"Winner: PLAYER_1".to_string()));
        assert!(lines.contains(&"Winning line: [2, 0], [3, 0], [4, 0], [5, 0]".to_string()));
    }

    #[test]
    fn test_render_report_covers_every_step() {
        let moves = [3, 3, 4];
        let report = render_report(&validate(&moves), &moves);
        for label in ["STEP_0", "STEP_1", "STEP_2", "STEP_3"] {
            assert!(report.contains(label), "missing {label}");
        }
        assert_eq!(report.matches("Status:").count(), 4);
    }
}
