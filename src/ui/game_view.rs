use crate::game::{Cell, GameState, GameStatus, Player, Position};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::board_widget::{cell_span, player_color};

/// A piece on its way down, drawn over the board. The move is already on
/// the board at `landing`, which stays blank until the piece gets there.
pub struct FallingPiece {
    pub position: Position,
    pub landing: Position,
    pub player: Player,
}

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    falling: Option<FallingPiece>,
    message: &Option<String>,
    show_game_over: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, chunks[0]);
    render_board(frame, game_state, selected_column, falling, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);

    if show_game_over {
        render_game_over(frame, game_state);
    }
}

fn render_header(frame: &mut Frame, game_state: &GameState, area: Rect) {
    let player = game_state.current_player();
    let (status, color) = match game_state.status() {
        GameStatus::InProgress => (
            format!("Current Player: {}", player.name()),
            player_color(player),
        ),
        GameStatus::Won { winner, .. } => (
            format!("Game Over  |  {} wins", winner.name()),
            player_color(winner),
        ),
        GameStatus::Drawn => ("Game Over  |  Draw".to_string(), Color::Yellow),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    falling: Option<FallingPiece>,
    area: Rect,
) {
    let board = game_state.board();
    let winning_line = game_state.winning_line();
    let frame_width = board.cols() * 3 + 2;
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..board.cols() {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(frame_width - 2))));

    for row in 0..board.rows() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..board.cols() {
            let pos = Position::new(row, col);
            let span = match &falling {
                Some(piece) if piece.position == pos => {
                    cell_span(piece.player.to_cell(), false)
                }
                Some(piece) if piece.landing == pos => cell_span(Cell::Empty, false),
                Some(_) => cell_span(board.get(row, col), false),
                None => cell_span(board.get(row, col), winning_line.contains(&pos)),
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(frame_width - 2))));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..board.cols() {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  Enter: Drop  |  H: History  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

fn render_game_over(frame: &mut Frame, game_state: &GameState) {
    let area = centered_rect(50, 40, frame.area());
    frame.render_widget(Clear, area);

    let (text, color) = match game_state.winner() {
        Some(winner) => (format!("{} wins!", winner.name()), player_color(winner)),
        None => ("It's a draw!".to_string(), Color::Yellow),
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("R: New game  |  H: Move history  |  Q: Quit"),
    ];

    let popup = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game over "),
    );
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
