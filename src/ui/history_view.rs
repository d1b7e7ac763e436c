use crate::game::{COLS, ROWS};
use crate::replay::{describe_step, step_label, StepStatus, ValidationOutput};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::board_widget::render_board_compact;

fn status_color(status: StepStatus) -> Color {
    match status {
        StepStatus::Waiting => Color::DarkGray,
        StepStatus::Pending => Color::White,
        StepStatus::Win => Color::Green,
        StepStatus::Draw => Color::Yellow,
    }
}

/// Full-screen move history: step list on the left, the selected step's
/// details and board on the right.
pub fn render(frame: &mut Frame, output: &ValidationOutput, moves: &[usize], selected: usize) {
    let [main, footer] =
        Layout::vertical([Constraint::Min(10), Constraint::Length(3)]).areas(frame.area());
    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Length(24), Constraint::Min(30)]).areas(main);

    render_step_list(frame, output, selected, list_area);
    render_step_detail(frame, output, moves, selected, detail_area);

    let controls = Paragraph::new("↑/↓: Select step  |  Esc/H: Back  |  Q: Quit")
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, footer);
}

fn render_step_list(frame: &mut Frame, output: &ValidationOutput, selected: usize, area: Rect) {
    let items: Vec<ListItem> = output
        .steps()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let text = format!("{:<9} {}", step_label(i), record.status.as_str().to_uppercase());
            ListItem::new(text).style(Style::default().fg(status_color(record.status)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Game history"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_step_detail(
    frame: &mut Frame,
    output: &ValidationOutput,
    moves: &[usize],
    selected: usize,
    area: Rect,
) {
    let Some(record) = output.step(selected) else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(step_label(selected));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text: Vec<Line> = describe_step(selected, record, moves)
        .into_iter()
        .skip(1) // label is the block title
        .map(Line::from)
        .collect();
    let text_height = text.len() as u16;

    let [text_area, _, board_area] = Layout::vertical([
        Constraint::Length(text_height),
        Constraint::Length(1),
        Constraint::Min(ROWS as u16),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(text), text_area);

    let board = record.to_board(ROWS, COLS);
    let highlight = record
        .winner
        .as_ref()
        .map(|w| w.positions.as_slice())
        .unwrap_or(&[]);
    render_board_compact(frame, &board, highlight, board_area);
}
