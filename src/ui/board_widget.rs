use crate::game::{Board, Cell, Player, Position};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn player_color(player: Player) -> Color {
    match player {
        Player::Player1 => Color::Red,
        Player::Player2 => Color::Blue,
    }
}

/// Symbol and style for one cell. Cells on the winning line are drawn bold
/// and reversed.
pub fn cell_span(cell: Cell, highlighted: bool) -> Span<'static> {
    let (symbol, color) = match cell.player() {
        None => (" . ", Color::DarkGray),
        Some(player) => (" \u{25cf} ", player_color(player)),
    };
    let mut style = Style::default().fg(color);
    if highlighted {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    Span::styled(symbol, style)
}

/// Render a compact board (no column selector, no borders) into the given area.
pub fn render_board_compact(frame: &mut Frame, board: &Board, highlight: &[Position], area: Rect) {
    let mut lines = Vec::new();

    for row in 0..board.rows() {
        let mut spans = Vec::new();
        for col in 0..board.cols() {
            let highlighted = highlight.contains(&Position::new(row, col));
            spans.push(cell_span(board.get(row, col), highlighted));
        }
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(lines);
    frame.render_widget(widget, area);
}
