use crate::config::UiConfig;
use crate::game::{GameState, GameStatus, Player, Position};
use crate::replay::{validate, ValidationOutput};
use crate::storage::GameStore;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{info, warn};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::game_view::FallingPiece;

enum Mode {
    Playing,
    GameOver,
    History {
        output: ValidationOutput,
        selected: usize,
    },
}

/// Animation cursor for the last accepted move. The move itself is already
/// committed; this only tracks the piece on its way to `target_row`.
struct PendingDrop {
    column: usize,
    target_row: usize,
    row: usize,
    player: Player,
    last_frame: Instant,
}

pub struct App {
    game_state: GameState,
    store: GameStore,
    autosave: bool,
    ui: UiConfig,
    selected_column: usize,
    mode: Mode,
    drop: Option<PendingDrop>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    /// Start from `game_state`, usually the saved game or a fresh one.
    pub fn new(game_state: GameState, store: GameStore, autosave: bool, ui: UiConfig) -> Self {
        let mode = if game_state.is_terminal() {
            Mode::GameOver
        } else {
            Mode::Playing
        };
        let message = if game_state.moves().is_empty() {
            None
        } else {
            Some(format!("Resumed saved game ({} moves)", game_state.moves().len()))
        };
        App {
            game_state,
            store,
            autosave,
            selected_column: ui.start_column,
            ui,
            mode,
            drop: None,
            should_quit: false,
            message,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.advance_drop();
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        let timeout = if self.drop.is_some() {
            self.ui.drop_frame_ms
        } else {
            self.ui.tick_ms
        };
        if event::poll(Duration::from_millis(timeout))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        match &mut self.mode {
            Mode::History { output, selected } => match key.code {
                KeyCode::Up => *selected = selected.saturating_sub(1),
                KeyCode::Down => *selected = (*selected + 1).min(output.len() - 1),
                KeyCode::Home => *selected = 0,
                KeyCode::End => *selected = output.len() - 1,
                KeyCode::Esc | KeyCode::Char('h') => self.leave_history(),
                _ => {}
            },
            Mode::GameOver => match key.code {
                KeyCode::Char('r') => self.restart(),
                KeyCode::Char('h') => self.show_history(),
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            Mode::Playing => {
                // Input waits for the falling piece to land
                if self.drop.is_some() {
                    return;
                }
                self.message = None;
                match key.code {
                    KeyCode::Esc => self.should_quit = true,
                    KeyCode::Left => {
                        self.selected_column = self.selected_column.saturating_sub(1);
                    }
                    KeyCode::Right => {
                        if self.selected_column + 1 < self.game_state.board().cols() {
                            self.selected_column += 1;
                        }
                    }
                    KeyCode::Char(c @ '1'..='9') => {
                        let col = c as usize - '1' as usize;
                        if col < self.game_state.board().cols() {
                            self.selected_column = col;
                        }
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => self.drop_piece(),
                    KeyCode::Char('r') => self.restart(),
                    KeyCode::Char('h') => self.show_history(),
                    _ => {}
                }
            }
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        let (next, landing_row) = self.game_state.drop_piece(self.selected_column);
        let Some(target_row) = landing_row else {
            self.message = Some(if self.game_state.is_terminal() {
                "Game over! Press 'r' to restart.".to_string()
            } else {
                "Column is full!".to_string()
            });
            return;
        };

        let player = self.game_state.current_player();
        self.game_state = next;
        self.persist();

        self.drop = Some(PendingDrop {
            column: self.selected_column,
            target_row,
            row: 0,
            player,
            last_frame: Instant::now(),
        });
        self.advance_drop();
    }

    /// Move the falling piece down one row per frame and announce the outcome
    /// once it lands.
    fn advance_drop(&mut self) {
        let frame = Duration::from_millis(self.ui.drop_frame_ms);
        let landed = match &mut self.drop {
            None => return,
            Some(drop) => {
                if drop.row < drop.target_row && drop.last_frame.elapsed() >= frame {
                    drop.row += 1;
                    drop.last_frame = Instant::now();
                }
                drop.row >= drop.target_row
            }
        };
        if landed {
            self.drop = None;
            self.finish_move();
        }
    }

    fn finish_move(&mut self) {
        match self.game_state.status() {
            GameStatus::InProgress => {}
            GameStatus::Won { winner, .. } => {
                info!(
                    "{} won after {} moves",
                    winner.name(),
                    self.game_state.moves().len()
                );
                self.mode = Mode::GameOver;
            }
            GameStatus::Drawn => {
                info!("draw after {} moves", self.game_state.moves().len());
                self.mode = Mode::GameOver;
            }
        }
    }

    fn persist(&mut self) {
        if !self.autosave {
            return;
        }
        if let Err(e) = self.store.save(&self.game_state) {
            warn!("failed to save game: {e}");
            self.message = Some(format!("Could not save game: {e}"));
        }
    }

    fn restart(&mut self) {
        self.game_state = GameState::initial();
        self.drop = None;
        self.mode = Mode::Playing;
        self.selected_column = self.ui.start_column;
        self.message = Some("New game started!".to_string());
        if let Err(e) = self.store.clear() {
            warn!("failed to clear saved game: {e}");
        }
        info!("new game started");
    }

    fn show_history(&mut self) {
        let output = validate(self.game_state.moves());
        let selected = output.len() - 1;
        self.mode = Mode::History { output, selected };
    }

    fn leave_history(&mut self) {
        self.mode = if self.game_state.is_terminal() {
            Mode::GameOver
        } else {
            Mode::Playing
        };
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        match &self.mode {
            Mode::History { output, selected } => {
                super::history_view::render(frame, output, self.game_state.moves(), *selected);
            }
            Mode::Playing | Mode::GameOver => {
                let falling = self.drop.as_ref().map(|drop| FallingPiece {
                    position: Position::new(drop.row, drop.column),
                    landing: Position::new(drop.target_row, drop.column),
                    player: drop.player,
                });
                super::game_view::render(
                    frame,
                    &self.game_state,
                    self.selected_column,
                    falling,
                    &self.message,
                    matches!(self.mode, Mode::GameOver),
                );
            }
        }
    }
}
